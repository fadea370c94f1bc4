//! Geocoding and directions capability.
//!
//! The relay only needs a narrow slice of a mapping service: turn a place
//! name into coordinates, turn coordinates back into a label, and ask for a
//! route between two points. Providers keep the raw directions payload so it
//! can be served back to clients untouched.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Parse a `"lon,lat"` literal.
    ///
    /// Returns `None` unless the text is exactly two numbers within the
    /// valid longitude/latitude ranges.
    pub fn parse(text: &str) -> Option<Self> {
        let (lon, lat) = text.split_once(',')?;
        let longitude: f64 = lon.trim().parse().ok()?;
        let latitude: f64 = lat.trim().parse().ok()?;

        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return None;
        }

        Some(Self::new(longitude, latitude))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// A single geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeFeature {
    /// Human-readable name of the match.
    pub place_name: String,
    /// Position of the match.
    pub center: Coordinates,
}

/// Travel mode for directions and isochrones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteProfile {
    #[default]
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl RouteProfile {
    /// Profile name as used in provider URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteProfile::Driving => "driving",
            RouteProfile::DrivingTraffic => "driving-traffic",
            RouteProfile::Walking => "walking",
            RouteProfile::Cycling => "cycling",
        }
    }
}

impl fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Ok(RouteProfile::Driving),
            "driving-traffic" => Ok(RouteProfile::DrivingTraffic),
            "walking" => Ok(RouteProfile::Walking),
            "cycling" => Ok(RouteProfile::Cycling),
            other => Err(format!("unknown route profile: {}", other)),
        }
    }
}

/// Optional knobs for a directions request.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsOptions {
    pub alternatives: bool,
    pub geometries: String,
    pub overview: String,
    pub steps: bool,
    pub annotations: Option<String>,
    pub language: Option<String>,
}

impl Default for DirectionsOptions {
    fn default() -> Self {
        Self {
            alternatives: false,
            geometries: "geojson".to_string(),
            overview: "full".to_string(),
            steps: true,
            annotations: None,
            language: None,
        }
    }
}

/// Headline numbers of one route candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRoute {
    /// Travel time in seconds.
    pub duration_secs: f64,
    /// Travel distance in meters.
    pub distance_meters: f64,
}

/// A directions response: parsed route candidates plus the untouched payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    /// Route candidates in provider order (best first).
    pub routes: Vec<DirectionsRoute>,
    /// Raw provider response.
    pub raw: Value,
}

/// Parameters for an isochrone (reachable-area) request.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneRequest {
    pub profile: RouteProfile,
    pub center: Coordinates,
    pub contours_minutes: Vec<u32>,
    pub polygons: bool,
    pub generalize: Option<f64>,
    pub denoise: Option<f64>,
}

impl IsochroneRequest {
    /// Create a request with polygon output and no smoothing.
    pub fn new(profile: RouteProfile, center: Coordinates, contours_minutes: Vec<u32>) -> Self {
        Self {
            profile,
            center,
            contours_minutes,
            polygons: true,
            generalize: None,
            denoise: None,
        }
    }
}

/// A geocoding/directions provider.
#[async_trait]
pub trait MappingProvider: Send + Sync {
    /// Resolve a place name to candidate positions, best match first.
    async fn geocode(&self, query: &str, limit: u32)
        -> Result<Vec<GeocodeFeature>, ProviderError>;

    /// Resolve a position to candidate place names, best match first.
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        limit: u32,
    ) -> Result<Vec<GeocodeFeature>, ProviderError>;

    /// Request routes through the given waypoints.
    async fn directions(
        &self,
        profile: RouteProfile,
        waypoints: &[Coordinates],
        options: &DirectionsOptions,
    ) -> Result<Directions, ProviderError>;

    /// Request reachable-area contours around a point.
    async fn isochrone(&self, request: &IsochroneRequest) -> Result<Value, ProviderError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let coords = Coordinates::parse("2.3522, 48.8566").unwrap();
        assert_eq!(coords.longitude, 2.3522);
        assert_eq!(coords.latitude, 48.8566);
        assert_eq!(coords.to_string(), "2.3522,48.8566");
    }

    #[test]
    fn test_parse_coordinates_rejects_text_and_ranges() {
        assert!(Coordinates::parse("Paris").is_none());
        assert!(Coordinates::parse("Paris, France").is_none());
        assert!(Coordinates::parse("200,10").is_none());
        assert!(Coordinates::parse("10,95").is_none());
        assert!(Coordinates::parse("1,2,3").is_none());
    }

    #[test]
    fn test_route_profile_round_trip() {
        for profile in [
            RouteProfile::Driving,
            RouteProfile::DrivingTraffic,
            RouteProfile::Walking,
            RouteProfile::Cycling,
        ] {
            assert_eq!(profile.as_str().parse::<RouteProfile>(), Ok(profile));
        }
        assert!("flying".parse::<RouteProfile>().is_err());
    }

    #[test]
    fn test_directions_options_defaults() {
        let options = DirectionsOptions::default();
        assert!(!options.alternatives);
        assert_eq!(options.geometries, "geojson");
        assert_eq!(options.overview, "full");
        assert!(options.steps);
        assert!(options.annotations.is_none());
    }
}
