use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard_handlers;
use crate::forecast::handlers as forecast_handlers;
use crate::openapi::swagger_ui;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Build the dashboard routes (search, voice, rendered state)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(dashboard_handlers::search))
        .route("/search/{city}", post(dashboard_handlers::search))
        .route("/dashboard", get(dashboard_handlers::get_dashboard))
        .route("/capabilities", get(dashboard_handlers::get_capabilities))
        .route("/voice", post(dashboard_handlers::voice_search))
}

/// Build the one-shot lookup routes
fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/weather/{city}", get(weather_handlers::get_weather))
        .route("/forecast/{city}", get(forecast_handlers::get_forecast))
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes())
        .merge(lookup_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
