//! Static mapping provider - answers from fixed tables.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use relay_core::{
    async_trait, Coordinates, Directions, DirectionsOptions, DirectionsRoute, GeocodeFeature,
    IsochroneRequest, MappingProvider, ProviderError, RouteProfile,
};
use serde_json::{json, Value};

/// Snapshot of how many times each operation was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingCalls {
    pub geocode: usize,
    pub reverse_geocode: usize,
    pub directions: usize,
    pub isochrone: usize,
}

impl MappingCalls {
    /// Total calls across every operation.
    pub fn total(&self) -> usize {
        self.geocode + self.reverse_geocode + self.directions + self.isochrone
    }
}

/// A mapping provider backed by in-memory tables.
///
/// Place lookups are case-insensitive on the trimmed query. Unknown places
/// geocode to an empty result. Directions always return the configured
/// route (or none, see [`StaticMapping::without_routes`]).
///
/// # Example
///
/// ```rust
/// use mock_providers::{Coordinates, MappingProvider, StaticMapping};
///
/// #[tokio::main]
/// async fn main() {
///     let mapping = StaticMapping::new().with_place("Paris", Coordinates::new(2.35, 48.85));
///
///     let features = mapping.geocode("paris", 1).await.unwrap();
///     assert_eq!(features[0].place_name, "Paris");
///     assert_eq!(mapping.calls().geocode, 1);
/// }
/// ```
#[derive(Debug, Default)]
pub struct StaticMapping {
    places: HashMap<String, GeocodeFeature>,
    labels: Vec<GeocodeFeature>,
    route: Option<DirectionsRoute>,
    failure: Option<ProviderError>,
    geocode_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
    directions_calls: AtomicUsize,
    isochrone_calls: AtomicUsize,
}

impl StaticMapping {
    /// Create a provider with no places and a 1 hour / 100 km route.
    pub fn new() -> Self {
        Self {
            route: Some(DirectionsRoute {
                duration_secs: 3600.0,
                distance_meters: 100_000.0,
            }),
            ..Self::default()
        }
    }

    /// Register a place that geocodes to the given position.
    pub fn with_place(mut self, name: &str, center: Coordinates) -> Self {
        self.places.insert(
            key(name),
            GeocodeFeature {
                place_name: name.to_string(),
                center,
            },
        );
        self
    }

    /// Register a label returned by reverse geocoding.
    ///
    /// Reverse lookups return every registered label in insertion order,
    /// regardless of the queried position.
    pub fn with_label(mut self, name: &str, center: Coordinates) -> Self {
        self.labels.push(GeocodeFeature {
            place_name: name.to_string(),
            center,
        });
        self
    }

    /// Set the route returned by directions requests.
    pub fn with_route(mut self, duration_secs: f64, distance_meters: f64) -> Self {
        self.route = Some(DirectionsRoute {
            duration_secs,
            distance_meters,
        });
        self
    }

    /// Make directions requests return no route candidates.
    pub fn without_routes(mut self) -> Self {
        self.route = None;
        self
    }

    /// Fail every call with the given error.
    pub fn failing_with(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Per-operation call counts so far.
    pub fn calls(&self) -> MappingCalls {
        MappingCalls {
            geocode: self.geocode_calls.load(Ordering::SeqCst),
            reverse_geocode: self.reverse_calls.load(Ordering::SeqCst),
            directions: self.directions_calls.load(Ordering::SeqCst),
            isochrone: self.isochrone_calls.load(Ordering::SeqCst),
        }
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl MappingProvider for StaticMapping {
    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodeFeature>, ProviderError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self
            .places
            .get(&key(query))
            .cloned()
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn reverse_geocode(
        &self,
        _coordinates: Coordinates,
        limit: u32,
    ) -> Result<Vec<GeocodeFeature>, ProviderError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self.labels.iter().take(limit as usize).cloned().collect())
    }

    async fn directions(
        &self,
        profile: RouteProfile,
        waypoints: &[Coordinates],
        _options: &DirectionsOptions,
    ) -> Result<Directions, ProviderError> {
        self.directions_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let routes: Vec<DirectionsRoute> = self.route.into_iter().collect();
        let raw = if routes.is_empty() {
            json!({"code": "NoRoute", "routes": []})
        } else {
            json!({
                "code": "Ok",
                "profile": profile.as_str(),
                "waypoints": waypoints
                    .iter()
                    .map(|c| json!([c.longitude, c.latitude]))
                    .collect::<Vec<Value>>(),
                "routes": routes
                    .iter()
                    .map(|r| json!({"duration": r.duration_secs, "distance": r.distance_meters}))
                    .collect::<Vec<Value>>(),
            })
        };

        Ok(Directions { routes, raw })
    }

    async fn isochrone(&self, request: &IsochroneRequest) -> Result<Value, ProviderError> {
        self.isochrone_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(json!({
            "type": "FeatureCollection",
            "features": request
                .contours_minutes
                .iter()
                .map(|minutes| json!({
                    "type": "Feature",
                    "properties": {"contour": minutes, "profile": request.profile.as_str()},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [request.center.longitude, request.center.latitude]
                    }
                }))
                .collect::<Vec<Value>>(),
        }))
    }

    fn name(&self) -> &str {
        "StaticMapping"
    }
}
