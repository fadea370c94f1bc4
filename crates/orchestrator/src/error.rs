//! Error types for orchestrator operations.

use std::fmt;

use relay_core::ProviderError;
use thiserror::Error;

/// Which end of a route a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSide {
    Origin,
    Destination,
}

impl fmt::Display for RouteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSide::Origin => f.write_str("origin"),
            RouteSide::Destination => f.write_str("destination"),
        }
    }
}

/// Reasons a route request could not be resolved.
///
/// The display text is shown to the user as the reply, so it must never
/// contain credentials or raw prompts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// Neither the model nor the lexical fallback produced both endpoints.
    #[error("Could not extract origin and destination from your message. Try \"travel from <place> to <place>\".")]
    ExtractionFailed,

    /// Geocoding returned no match for one side.
    #[error("Could not find {side} location: {place}")]
    LocationNotFound { side: RouteSide, place: String },

    /// The directions provider returned no route candidates.
    #[error("No route found between those locations.")]
    NoRouteFound,

    /// A mapping call failed or timed out.
    #[error("Route lookup failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur while building an orchestrator.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A provider client could not be created.
    #[error("provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    /// An environment variable held an unusable value.
    #[error("invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_not_found_names_side() {
        let err = ResolutionError::LocationNotFound {
            side: RouteSide::Destination,
            place: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "Could not find destination location: Atlantis");
    }

    #[test]
    fn test_provider_error_converts() {
        let err: ResolutionError = ProviderError::timeout("mapbox").into();
        assert!(err.to_string().contains("mapbox"));
        assert!(matches!(err, ResolutionError::Provider(_)));
    }
}
