//! Route resolution: endpoint extraction, geocoding, directions, summary.
//!
//! The resolver never touches conversation state. It returns a
//! [`ResolvedRoute`] on success and the caller decides what to store, so a
//! failed resolution cannot leave a partial update behind.

use std::sync::Arc;
use std::time::Duration;

use relay_core::{
    with_deadline, Coordinates, DirectionsOptions, GenerationOptions, MappingProvider,
    RouteProfile, RouteSummary, TextGenerator,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::error::{ResolutionError, RouteSide};
use crate::formatting::{format_route_reply, summarize};
use crate::prompt::build_extraction_prompt;

/// Default bound on each external call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Origin and destination as named in the user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub origin: String,
    pub destination: String,
}

impl Endpoints {
    fn new(origin: &str, destination: &str) -> Option<Self> {
        let origin = clean_place(origin);
        let destination = clean_place(destination);
        if origin.is_empty() || destination.is_empty() {
            return None;
        }
        Some(Self {
            origin,
            destination,
        })
    }
}

/// A successfully resolved route.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub summary: RouteSummary,
    /// Reply text shown to the user.
    pub reply: String,
    /// Untouched directions payload from the provider.
    pub raw_directions: Value,
}

/// A located endpoint: display label plus position.
#[derive(Debug, Clone, PartialEq)]
struct Located {
    label: String,
    center: Coordinates,
}

/// JSON shape requested from the model during extraction.
#[derive(Debug, Deserialize)]
struct ExtractedEndpoints {
    origin: Option<String>,
    destination: Option<String>,
}

/// Resolves free-text route requests into route summaries.
pub struct RouteResolver {
    generator: Arc<dyn TextGenerator>,
    mapping: Arc<dyn MappingProvider>,
    profile: RouteProfile,
    call_timeout: Duration,
}

impl RouteResolver {
    /// Create a resolver using driving directions and the default call timeout.
    pub fn new(generator: Arc<dyn TextGenerator>, mapping: Arc<dyn MappingProvider>) -> Self {
        Self {
            generator,
            mapping,
            profile: RouteProfile::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the travel profile used for directions.
    pub fn with_profile(mut self, profile: RouteProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the bound applied to every external call.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// The mapping provider.
    pub fn mapping(&self) -> &Arc<dyn MappingProvider> {
        &self.mapping
    }

    /// Resolve a route request.
    pub async fn resolve(&self, message: &str) -> Result<ResolvedRoute, ResolutionError> {
        let endpoints = self
            .extract_endpoints(message)
            .await
            .ok_or(ResolutionError::ExtractionFailed)?;

        info!(
            origin = %endpoints.origin,
            destination = %endpoints.destination,
            "Resolving route"
        );

        let (origin, destination) = tokio::join!(
            self.locate(RouteSide::Origin, &endpoints.origin),
            self.locate(RouteSide::Destination, &endpoints.destination),
        );
        let origin = origin?;
        let destination = destination?;

        let directions = with_deadline(
            self.mapping.name(),
            self.call_timeout,
            self.mapping.directions(
                self.profile,
                &[origin.center, destination.center],
                &DirectionsOptions::default(),
            ),
        )
        .await?;

        let route = directions
            .routes
            .first()
            .ok_or(ResolutionError::NoRouteFound)?;

        let summary = summarize(&origin.label, &destination.label, route);
        debug!("Resolved route: {}", summary.hint());

        Ok(ResolvedRoute {
            reply: format_route_reply(&summary),
            summary,
            raw_directions: directions.raw,
        })
    }

    /// Ask the model for both endpoints, falling back to a lexical split.
    async fn extract_endpoints(&self, message: &str) -> Option<Endpoints> {
        let prompt = build_extraction_prompt(message);
        trace!("Extraction prompt: {}", prompt);

        let result = with_deadline(
            self.generator.name(),
            self.call_timeout,
            self.generator
                .generate(&prompt, &GenerationOptions::extraction()),
        )
        .await;

        match result {
            Ok(response) => match parse_extraction(&response) {
                Some(endpoints) => return Some(endpoints),
                None => debug!("Unusable extraction output, using lexical split: {}", response),
            },
            Err(e) => warn!("Extraction call failed, using lexical split: {}", e),
        }

        lexical_split(message)
    }

    /// Turn a place name (or coordinate literal) into a position.
    async fn locate(&self, side: RouteSide, place: &str) -> Result<Located, ResolutionError> {
        if let Some(center) = Coordinates::parse(place) {
            let label = self.label_for(center, place).await;
            return Ok(Located { label, center });
        }

        let features = with_deadline(
            self.mapping.name(),
            self.call_timeout,
            self.mapping.geocode(place, 1),
        )
        .await?;

        let feature = features
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionError::LocationNotFound {
                side,
                place: place.to_string(),
            })?;

        debug!("Geocoded {} {:?} to {}", side, place, feature.center);

        Ok(Located {
            label: place.to_string(),
            center: feature.center,
        })
    }

    /// Best-effort display label for a coordinate literal.
    async fn label_for(&self, center: Coordinates, literal: &str) -> String {
        let result = with_deadline(
            self.mapping.name(),
            self.call_timeout,
            self.mapping.reverse_geocode(center, 1),
        )
        .await;

        match result {
            Ok(features) => features
                .into_iter()
                .map(|feature| feature.place_name)
                .find(|name| !name.trim().is_empty())
                .unwrap_or_else(|| literal.to_string()),
            Err(e) => {
                debug!("Reverse geocoding {} failed: {}", center, e);
                literal.to_string()
            }
        }
    }
}

/// Parse the model's extraction output.
fn parse_extraction(response: &str) -> Option<Endpoints> {
    let json = extract_json(response);
    let extracted: ExtractedEndpoints = serde_json::from_str(json).ok()?;
    Endpoints::new(
        extracted.origin.as_deref().unwrap_or_default(),
        extracted.destination.as_deref().unwrap_or_default(),
    )
}

/// Split on the literal separators `" from "` and `" to "`.
///
/// Matching is case-insensitive; a message may also start with `from`.
/// The destination is everything after the first `" to "` that follows
/// `" from "`.
pub fn lexical_split(message: &str) -> Option<Endpoints> {
    const FROM: &str = " from ";
    const TO: &str = " to ";

    let padded = format!(" {}", message);
    // ASCII lowercasing keeps byte offsets aligned with `padded`.
    let lowered = padded.to_ascii_lowercase();

    let origin_start = lowered.find(FROM)? + FROM.len();
    let to_offset = lowered[origin_start..].find(TO)?;
    let origin_end = origin_start + to_offset;
    let destination_start = origin_end + TO.len();

    Endpoints::new(
        &padded[origin_start..origin_end],
        &padded[destination_start..],
    )
}

fn clean_place(place: &str) -> String {
    place
        .trim()
        .trim_end_matches(['.', '!', '?', ',', ';', ':'])
        .trim()
        .to_string()
}

/// Extract JSON from a model response, handling code fences and prose.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if trimmed.starts_with('{') {
        return extract_balanced_json(trimmed);
    }

    // Fenced block, with or without a language tag
    if let Some(start) = trimmed.find("```") {
        let after_backticks = &trimmed[start + 3..];
        let body_start = after_backticks.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = after_backticks[body_start..].find("```") {
            let fenced = after_backticks[body_start..body_start + end].trim();
            return extract_balanced_json(fenced);
        }
    }

    if let Some(start) = trimmed.find('{') {
        return extract_balanced_json(&trimmed[start..]);
    }

    trimmed
}

/// Cut a string starting with `{` at its matching closing brace.
///
/// Returns the input unchanged when the braces never balance.
fn extract_balanced_json(s: &str) -> &str {
    if !s.starts_with('{') {
        return s;
    }

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}
