use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::ForecastOutlook;
use crate::error::LookupError;
use crate::presenter::normalize_city;
use crate::AppState;

/// Aggregated outlook plus its display text
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastReport {
    #[serde(flatten)]
    pub outlook: ForecastOutlook,
    /// Absent when no samples remain after excluding today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Get daily summaries and the overall trend without touching the dashboard
///
/// GET /api/v1/forecast/{city}
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ForecastReport>, LookupError> {
    let city = normalize_city(&city)?;

    let samples = state.weather_client.forecast(city).await?;
    let today = state.aggregator.local_date((state.clock)());
    let outlook = state.aggregator.aggregate(&samples, today);
    let summary = outlook.trend.text();

    Ok(Json(ForecastReport { outlook, summary }))
}
