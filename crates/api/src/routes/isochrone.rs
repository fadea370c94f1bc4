//! Reachable-area pass-through.

use axum::extract::{Query, State};
use axum::Json;
use relay_core::{with_deadline, Coordinates, IsochroneRequest, RouteProfile};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Most contours a single request may ask for.
const MAX_CONTOURS: usize = 4;

/// Longest contour, in minutes.
const MAX_CONTOUR_MINUTES: u32 = 60;

#[derive(Debug, Deserialize)]
pub struct IsochroneParams {
    pub longitude: f64,
    pub latitude: f64,
    /// Comma-separated contour times, e.g. `10,20`.
    pub minutes: String,
    pub profile: Option<String>,
    pub polygons: Option<bool>,
}

impl IsochroneParams {
    /// Validate and convert into a provider request.
    pub fn into_request(self) -> Result<IsochroneRequest> {
        let center = Coordinates::parse(&format!("{},{}", self.longitude, self.latitude))
            .ok_or_else(|| ApiError::BadRequest("longitude/latitude out of range".to_string()))?;

        let profile = match self.profile.as_deref() {
            Some(name) => name.parse::<RouteProfile>().map_err(ApiError::BadRequest)?,
            None => RouteProfile::Driving,
        };

        let contours = parse_contours(&self.minutes)?;

        let mut request = IsochroneRequest::new(profile, center, contours);
        if let Some(polygons) = self.polygons {
            request.polygons = polygons;
        }
        Ok(request)
    }
}

fn parse_contours(minutes: &str) -> Result<Vec<u32>> {
    let contours = minutes
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u32>() {
            Ok(value) if (1..=MAX_CONTOUR_MINUTES).contains(&value) => Ok(value),
            _ => Err(ApiError::BadRequest(format!(
                "invalid contour {:?}: expected 1-{} minutes",
                part, MAX_CONTOUR_MINUTES
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    if contours.is_empty() || contours.len() > MAX_CONTOURS {
        return Err(ApiError::BadRequest(format!(
            "expected 1-{} contours",
            MAX_CONTOURS
        )));
    }

    Ok(contours)
}

/// `GET /isochrone` - raw provider JSON for the requested contours.
pub async fn isochrone(
    State(state): State<AppState>,
    Query(params): Query<IsochroneParams>,
) -> Result<Json<Value>> {
    let request = params.into_request()?;
    let mapping = state.mapping();
    tracing::debug!(
        profile = %request.profile,
        center = %request.center,
        contours = ?request.contours_minutes,
        "Isochrone request"
    );

    let timeout = state.orchestrator.config().call_timeout;
    let payload = with_deadline(mapping.name(), timeout, mapping.isochrone(&request)).await?;
    Ok(Json(payload))
}
