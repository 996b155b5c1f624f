mod advisory;
mod config;
mod dashboard;
mod error;
mod extractors;
mod forecast;
mod format;
mod icons;
mod openapi;
mod presenter;
mod routes;
#[cfg(test)]
mod testing;
mod voice;
mod weather;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::advisory::AdvisoryEngine;
use crate::config::AppConfig;
use crate::dashboard::DashboardSurface;
use crate::forecast::ForecastAggregator;
use crate::presenter::{Clock, Presenter};
use crate::voice::{HttpSpeechRecognizer, SpeechCapability, VoiceInputAdapter};
use crate::weather::{OpenWeatherMapClient, WeatherClient};

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub weather_client: Arc<dyn WeatherClient>,
    pub presenter: Arc<Presenter>,
    pub voice: Arc<VoiceInputAdapter>,
    pub surface: Arc<DashboardSurface>,
    pub advisory: AdvisoryEngine,
    pub aggregator: ForecastAggregator,
    /// Source of "now" for the stateless endpoints
    pub clock: Clock,
}

/// Create shared HTTP client with connection pooling
fn create_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()
}

/// Speech recognition is only offered when an endpoint is configured
fn speech_capability(client: &Client, config: &AppConfig) -> SpeechCapability {
    match config.speech.endpoint_url.as_deref() {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "Speech recognition configured");
            SpeechCapability::Available(Arc::new(HttpSpeechRecognizer::new(
                client.clone(),
                endpoint,
            )))
        }
        None => {
            tracing::info!("No speech endpoint configured, voice input disabled");
            SpeechCapability::Unavailable
        }
    }
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skydash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let timezone = config.tz()?;
    tracing::info!(timezone = %timezone, "Configuration loaded successfully");

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client()?;
    tracing::debug!("Shared HTTP client created");

    let weather_client: Arc<dyn WeatherClient> = Arc::new(OpenWeatherMapClient::new(
        http_client.clone(),
        &config.openweathermap_api_key,
        &config.api_base_url,
    ));

    let advisory = AdvisoryEngine::new(config.advisory);
    let surface = Arc::new(DashboardSurface::new());
    let clock: Clock = Arc::new(chrono::Utc::now);
    let presenter = Arc::new(
        Presenter::new(
            Arc::clone(&weather_client),
            surface.clone(),
            advisory,
            timezone,
        )
        .with_clock(Arc::clone(&clock)),
    );
    let voice = Arc::new(VoiceInputAdapter::new(
        speech_capability(&http_client, &config),
        Arc::clone(&presenter),
        surface.clone(),
    ));

    // Create shared application state
    let state = AppState {
        weather_client,
        presenter,
        voice,
        surface,
        advisory,
        aggregator: ForecastAggregator::new(timezone),
        clock,
    };

    // Build router
    let app = routes::build_router()
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                // Request timeout (voice capture can take a while)
                .timeout(Duration::from_secs(60)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
