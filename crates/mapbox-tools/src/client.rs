//! Mapbox HTTP client.

use relay_core::{
    async_trait, Coordinates, Directions, DirectionsOptions, GeocodeFeature, IsochroneRequest,
    MappingProvider, ProviderError, RouteProfile,
};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api_types::{DirectionsResponse, GeocodeResponse};
use crate::config::MapboxConfig;
use crate::error::MapboxError;

/// Query parameters for one request; `None` values are dropped before sending.
type Params = Vec<(&'static str, Option<String>)>;

/// Client for the Mapbox geocoding, directions, and isochrone APIs.
pub struct MapboxClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxClient {
    /// Create a new client.
    pub fn new(config: MapboxConfig) -> Result<Self, MapboxError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        if config.access_token.is_none() {
            warn!("MAPBOX_ACCESS_TOKEN not set; mapping requests will fail until it is configured");
        }

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, MapboxError> {
        Self::new(MapboxConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &MapboxConfig {
        &self.config
    }

    /// GET a Mapbox endpoint and return its JSON body.
    async fn get(&self, path: &str, params: Params) -> Result<Value, MapboxError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or(MapboxError::MissingToken)?;

        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        let mut query: Vec<(&str, String)> = params
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        debug!("Fetching Mapbox {} with {:?}", path, query);

        query.push(("access_token", token.to_string()));

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapboxError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn fetch_geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodeFeature>, MapboxError> {
        let path = geocode_path(query)?;
        let raw = self
            .get(&path, vec![("limit", Some(limit.to_string()))])
            .await?;
        let response: GeocodeResponse = serde_json::from_value(raw)?;
        Ok(response.into_features())
    }

    async fn fetch_reverse_geocode(
        &self,
        coordinates: Coordinates,
        limit: u32,
    ) -> Result<Vec<GeocodeFeature>, MapboxError> {
        let path = reverse_geocode_path(coordinates);
        let raw = self
            .get(&path, vec![("limit", Some(limit.to_string()))])
            .await?;
        let response: GeocodeResponse = serde_json::from_value(raw)?;
        Ok(response.into_features())
    }

    async fn fetch_directions(
        &self,
        profile: RouteProfile,
        waypoints: &[Coordinates],
        options: &DirectionsOptions,
    ) -> Result<Directions, MapboxError> {
        let path = directions_path(profile, waypoints)?;
        let raw = self.get(&path, directions_params(options)).await?;
        let response: DirectionsResponse = serde_json::from_value(raw.clone())?;

        if response.routes.is_empty() {
            debug!("Mapbox directions returned no routes (code: {:?})", response.code);
        }

        Ok(Directions {
            routes: response.into_routes(),
            raw,
        })
    }

    async fn fetch_isochrone(&self, request: &IsochroneRequest) -> Result<Value, MapboxError> {
        if request.contours_minutes.is_empty() {
            return Err(MapboxError::InvalidParameter {
                name: "contours_minutes".to_string(),
                reason: "at least one contour is required".to_string(),
            });
        }

        let path = format!(
            "/isochrone/v1/mapbox/{}/{}",
            request.profile.as_str(),
            request.center
        );
        self.get(&path, isochrone_params(request)).await
    }
}

/// Path for forward geocoding.
fn geocode_path(query: &str) -> Result<String, MapboxError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(MapboxError::InvalidParameter {
            name: "query".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(format!(
        "/geocoding/v5/mapbox.places/{}.json",
        urlencoding::encode(query)
    ))
}

/// Path for reverse geocoding.
fn reverse_geocode_path(coordinates: Coordinates) -> String {
    format!("/geocoding/v5/mapbox.places/{}.json", coordinates)
}

/// Path for a directions request; needs at least two waypoints.
fn directions_path(profile: RouteProfile, waypoints: &[Coordinates]) -> Result<String, MapboxError> {
    if waypoints.len() < 2 {
        return Err(MapboxError::InvalidParameter {
            name: "coordinates".to_string(),
            reason: "must have at least 2 [lon,lat] points".to_string(),
        });
    }

    let joined = waypoints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";");

    Ok(format!("/directions/v5/mapbox/{}/{}", profile.as_str(), joined))
}

fn directions_params(options: &DirectionsOptions) -> Params {
    vec![
        ("alternatives", Some(options.alternatives.to_string())),
        ("geometries", Some(options.geometries.clone())),
        ("overview", Some(options.overview.clone())),
        ("steps", Some(options.steps.to_string())),
        ("annotations", options.annotations.clone()),
        ("language", options.language.clone()),
    ]
}

fn isochrone_params(request: &IsochroneRequest) -> Params {
    let contours = request
        .contours_minutes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    vec![
        ("contours_minutes", Some(contours)),
        ("polygons", Some(request.polygons.to_string())),
        ("generalize", request.generalize.map(|v| v.to_string())),
        ("denoise", request.denoise.map(|v| v.to_string())),
    ]
}

#[async_trait]
impl MappingProvider for MapboxClient {
    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodeFeature>, ProviderError> {
        Ok(self.fetch_geocode(query, limit).await?)
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        limit: u32,
    ) -> Result<Vec<GeocodeFeature>, ProviderError> {
        Ok(self.fetch_reverse_geocode(coordinates, limit).await?)
    }

    async fn directions(
        &self,
        profile: RouteProfile,
        waypoints: &[Coordinates],
        options: &DirectionsOptions,
    ) -> Result<Directions, ProviderError> {
        Ok(self.fetch_directions(profile, waypoints, options).await?)
    }

    async fn isochrone(&self, request: &IsochroneRequest) -> Result<Value, ProviderError> {
        Ok(self.fetch_isochrone(request).await?)
    }

    fn name(&self) -> &str {
        "Mapbox"
    }
}
