use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::advisory::AdvisoryEngine;
use crate::dashboard::view::{
    CurrentPanel, CurrentView, ForecastArea, ForecastCard, ForecastPanel, FORECAST_UNAVAILABLE,
};
use crate::dashboard::RenderSurface;
use crate::error::HttpError;
use crate::forecast::models::ForecastSample;
use crate::forecast::ForecastAggregator;
use crate::impl_into_response;
use crate::weather::models::CurrentConditions;
use crate::weather::{ProviderError, WeatherClient};

/// Source of the current instant
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Please enter a city name.")]
pub struct EmptyInputError;

impl HttpError for EmptyInputError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_code(&self) -> Option<&'static str> {
        Some("EMPTY_INPUT")
    }
}

impl_into_response!(EmptyInputError);

/// Trim user input, rejecting blank city names
pub fn normalize_city(input: &str) -> Result<&str, EmptyInputError> {
    let city = input.trim();
    if city.is_empty() {
        Err(EmptyInputError)
    } else {
        Ok(city)
    }
}

/// Decide what the current-conditions slots show for a request outcome
pub fn current_panel(
    result: Result<CurrentConditions, ProviderError>,
    advisory: &AdvisoryEngine,
    now: DateTime<Tz>,
) -> CurrentPanel {
    match result {
        Ok(conditions) => CurrentPanel {
            view: CurrentView::from_conditions(&conditions, now),
            advisory: Some(advisory.advise(&conditions)),
        },
        Err(_) => CurrentPanel {
            view: CurrentView::unavailable(),
            advisory: None,
        },
    }
}

/// Decide what the forecast area and trend text show for a request outcome
pub fn forecast_panel(
    result: Result<Vec<ForecastSample>, ProviderError>,
    aggregator: &ForecastAggregator,
    today: NaiveDate,
) -> ForecastPanel {
    match result {
        Ok(samples) => {
            let outlook = aggregator.aggregate(&samples, today);
            ForecastPanel {
                area: ForecastArea::Cards {
                    cards: outlook.days.iter().map(ForecastCard::from).collect(),
                },
                trend: outlook.trend.text(),
            }
        }
        Err(_) => ForecastPanel {
            area: ForecastArea::Unavailable {
                message: FORECAST_UNAVAILABLE.to_string(),
            },
            trend: None,
        },
    }
}

/// Handle to a lookup whose two requests are still in flight
#[derive(Debug)]
pub struct Lookup {
    pub sequence: u64,
    pub city: String,
    current: JoinHandle<()>,
    forecast: JoinHandle<()>,
}

impl Lookup {
    /// Wait until both halves have rendered (or been discarded)
    pub async fn finished(self) {
        let (current, forecast) = tokio::join!(self.current, self.forecast);
        if let Err(e) = current.and(forecast) {
            tracing::error!(sequence = self.sequence, error = %e, "Lookup task failed");
        }
    }
}

/// Orchestrates a lookup: clears the surface, issues both provider requests
/// and renders each result independently as it arrives.
pub struct Presenter {
    client: Arc<dyn WeatherClient>,
    surface: Arc<dyn RenderSurface>,
    advisory: AdvisoryEngine,
    aggregator: ForecastAggregator,
    timezone: Tz,
    clock: Clock,
    sequence: AtomicU64,
}

impl Presenter {
    pub fn new(
        client: Arc<dyn WeatherClient>,
        surface: Arc<dyn RenderSurface>,
        advisory: AdvisoryEngine,
        timezone: Tz,
    ) -> Self {
        Self {
            client,
            surface,
            advisory,
            aggregator: ForecastAggregator::new(timezone),
            timezone,
            clock: Arc::new(Utc::now),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start a lookup for `input`. Blank input is rejected before any
    /// request is made.
    pub async fn search(&self, input: &str) -> Result<Lookup, EmptyInputError> {
        let city = normalize_city(input)?.to_string();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(city = %city, sequence, "Starting weather lookup");

        if !self.surface.begin_lookup(sequence).await {
            tracing::debug!(sequence, "Newer lookup already started");
        }

        let current = tokio::spawn(Self::load_current(
            Arc::clone(&self.client),
            Arc::clone(&self.surface),
            self.advisory,
            self.timezone,
            Arc::clone(&self.clock),
            city.clone(),
            sequence,
        ));

        let forecast = tokio::spawn(Self::load_forecast(
            Arc::clone(&self.client),
            Arc::clone(&self.surface),
            self.aggregator,
            Arc::clone(&self.clock),
            city.clone(),
            sequence,
        ));

        Ok(Lookup {
            sequence,
            city,
            current,
            forecast,
        })
    }

    async fn load_current(
        client: Arc<dyn WeatherClient>,
        surface: Arc<dyn RenderSurface>,
        advisory: AdvisoryEngine,
        timezone: Tz,
        clock: Clock,
        city: String,
        sequence: u64,
    ) {
        let result = client.current_conditions(&city).await;
        if let Err(ref e) = result {
            tracing::error!(city = %city, sequence, error = %e, "Fetch current weather error");
        }

        let now = clock().with_timezone(&timezone);
        let panel = current_panel(result, &advisory, now);

        if !surface.render_current(sequence, panel).await {
            tracing::debug!(city = %city, sequence, "Discarded stale current conditions");
        }
    }

    async fn load_forecast(
        client: Arc<dyn WeatherClient>,
        surface: Arc<dyn RenderSurface>,
        aggregator: ForecastAggregator,
        clock: Clock,
        city: String,
        sequence: u64,
    ) {
        let result = client.forecast(&city).await;
        if let Err(ref e) = result {
            tracing::error!(city = %city, sequence, error = %e, "Fetch forecast error");
        }

        let today = aggregator.local_date(clock());
        let panel = forecast_panel(result, &aggregator, today);

        if !surface.render_forecast(sequence, panel).await {
            tracing::debug!(city = %city, sequence, "Discarded stale forecast");
        }
    }
}
