use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::{DashboardSnapshot, RenderSurface};
use crate::extractors::CityParam;
use crate::presenter::EmptyInputError;
use crate::voice::VoiceOutcome;
use crate::AppState;

/// Returned when a search has been accepted and its requests are in flight
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchAccepted {
    pub sequence: u64,
    pub city: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Capabilities {
    /// False when speech recognition is unavailable; hide the voice control
    pub voice_input: bool,
}

/// Submit a city name typed by the user
///
/// POST /api/v1/search?city=London
/// POST /api/v1/search/{city}
pub async fn search(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<(StatusCode, Json<SearchAccepted>), EmptyInputError> {
    let city = city.into_inner();
    let city = city.trim();
    state.surface.set_input(city).await;

    let lookup = state.presenter.search(city).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SearchAccepted {
            sequence: lookup.sequence,
            city: lookup.city,
        }),
    ))
}

/// Everything currently shown on the dashboard
///
/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.surface.snapshot().await)
}

/// GET /api/v1/capabilities
pub async fn get_capabilities(State(state): State<AppState>) -> Json<Capabilities> {
    Json(Capabilities {
        voice_input: state.voice.is_available(),
    })
}

/// Run one speech capture over the uploaded audio
///
/// POST /api/v1/voice
pub async fn voice_search(State(state): State<AppState>, audio: Bytes) -> Json<VoiceOutcome> {
    Json(state.voice.listen(audio.to_vec()).await)
}
