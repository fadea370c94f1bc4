//! Mapbox response shapes (only the fields the relay reads).

use relay_core::{Coordinates, DirectionsRoute, GeocodeFeature};
use serde::Deserialize;

/// Geocoding response (forward and reverse share the shape).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A geocoding feature.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub place_name: Option<String>,
    pub text: Option<String>,
    pub center: Option<[f64; 2]>,
    pub geometry: Option<PointGeometry>,
}

/// GeoJSON point geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

impl GeocodeResponse {
    /// Convert to relay features, skipping matches without a position.
    pub fn into_features(self) -> Vec<GeocodeFeature> {
        self.features
            .into_iter()
            .filter_map(|feature| {
                let [longitude, latitude] = feature
                    .center
                    .or_else(|| feature.geometry.map(|g| g.coordinates))?;
                let place_name = feature.place_name.or(feature.text).unwrap_or_default();
                Some(GeocodeFeature {
                    place_name,
                    center: Coordinates::new(longitude, latitude),
                })
            })
            .collect()
    }
}

/// Directions response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
    pub code: Option<String>,
}

/// A route candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Seconds.
    pub duration: f64,
    /// Meters.
    pub distance: f64,
}

impl DirectionsResponse {
    pub fn into_routes(self) -> Vec<DirectionsRoute> {
        self.routes
            .into_iter()
            .map(|route| DirectionsRoute {
                duration_secs: route.duration,
                distance_meters: route.distance,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocode_features() {
        let response: GeocodeResponse = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {"place_name": "Berlin, Germany", "center": [13.405, 52.52]},
                {"text": "Berlin Township", "geometry": {"type": "Point", "coordinates": [-74.9, 39.8]}},
                {"place_name": "Nowhere"}
            ]
        }))
        .unwrap();

        let features = response.into_features();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].place_name, "Berlin, Germany");
        assert_eq!(features[0].center, Coordinates::new(13.405, 52.52));
        assert_eq!(features[1].place_name, "Berlin Township");
        assert_eq!(features[1].center, Coordinates::new(-74.9, 39.8));
    }

    #[test]
    fn test_empty_geocode() {
        let response: GeocodeResponse = serde_json::from_value(json!({"features": []})).unwrap();
        assert!(response.into_features().is_empty());
    }

    #[test]
    fn test_directions_routes() {
        let response: DirectionsResponse = serde_json::from_value(json!({
            "code": "Ok",
            "routes": [{"duration": 12600.0, "distance": 1050000.0, "geometry": {}, "legs": []}],
            "waypoints": []
        }))
        .unwrap();

        let routes = response.into_routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].duration_secs, 12600.0);
        assert_eq!(routes[0].distance_meters, 1050000.0);
    }

    #[test]
    fn test_no_route() {
        let response: DirectionsResponse =
            serde_json::from_value(json!({"code": "NoRoute", "message": "No route found"})).unwrap();
        assert_eq!(response.code.as_deref(), Some("NoRoute"));
        assert!(response.into_routes().is_empty());
    }
}
