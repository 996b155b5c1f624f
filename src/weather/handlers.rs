use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::CurrentConditions;
use crate::advisory::AdvisoryResult;
use crate::error::LookupError;
use crate::presenter::normalize_city;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Current conditions together with the advisory derived from them
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentReport {
    pub conditions: CurrentConditions,
    pub advisory: AdvisoryResult,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get current conditions and advisory without touching the dashboard
///
/// GET /api/v1/weather/{city}
pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<CurrentReport>, LookupError> {
    let city = normalize_city(&city)?;

    let conditions = state.weather_client.current_conditions(city).await?;
    let advisory = state.advisory.advise(&conditions);

    Ok(Json(CurrentReport {
        conditions,
        advisory,
    }))
}
