//! Mapbox client for the Waypoint travel relay.
//!
//! This crate implements [`MappingProvider`] on top of the Mapbox web APIs:
//!
//! - **Geocoding** - place name to coordinates (`mapbox.places`)
//! - **Reverse geocoding** - coordinates to place name
//! - **Directions** - routes between waypoints for a travel profile
//! - **Isochrones** - reachable-area contours around a point
//!
//! The access token is read from the environment at construction but only
//! checked when a request is made, so a relay without mapping credentials
//! still starts and fails route requests with a readable error.
//!
//! # Example
//!
//! ```rust,no_run
//! use mapbox_tools::{MapboxClient, MappingProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MapboxClient::from_env()?;
//!     let features = client.geocode("Berlin", 1).await?;
//!     println!("{:?}", features.first());
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;
mod error;

pub use client::MapboxClient;
pub use config::MapboxConfig;
pub use error::MapboxError;

// Re-export relay-core types for convenience
pub use relay_core::{
    Coordinates, Directions, DirectionsOptions, DirectionsRoute, GeocodeFeature,
    IsochroneRequest, MappingProvider, ProviderError, RouteProfile,
};
