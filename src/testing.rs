//! Fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::forecast::models::ForecastSample;
use crate::presenter::Clock;
use crate::weather::models::CurrentConditions;
use crate::weather::{ProviderError, WeatherClient};

/// Always 2026-10-18 12:00 UTC
pub fn fixed_clock() -> Clock {
    Arc::new(|| {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
            .single()
            .unwrap_or_default()
    })
}

/// 8 cloudy samples per day for the 5 days following `today`, 10 to 20 °C
pub fn five_day_forecast(today: NaiveDate) -> Vec<ForecastSample> {
    let temps = [10.0, 12.0, 15.0, 18.0, 20.0, 17.0, 14.0, 11.0];
    let start = Utc.from_utc_datetime(&(today + chrono::Duration::days(1)).and_time(Default::default()));

    (0..40)
        .map(|slot| ForecastSample {
            timestamp: start + chrono::Duration::hours(3 * slot),
            temperature: temps[(slot % 8) as usize],
            condition: "Clouds".to_string(),
            description: "broken clouds".to_string(),
            icon: "04d".to_string(),
        })
        .collect()
}

/// In-memory provider with per-city delays and switchable failures
pub struct FakeWeatherClient {
    temperature: f64,
    condition: String,
    fail_current: bool,
    fail_forecast: bool,
    delays: HashMap<String, Duration>,
    samples: Option<Vec<ForecastSample>>,
    calls: AtomicUsize,
}

impl FakeWeatherClient {
    /// 22 °C and clear everywhere
    pub fn new() -> Self {
        Self {
            temperature: 22.0,
            condition: "Clear".to_string(),
            fail_current: false,
            fail_forecast: false,
            delays: HashMap::new(),
            samples: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_conditions(mut self, temperature: f64, condition: &str) -> Self {
        self.temperature = temperature;
        self.condition = condition.to_string();
        self
    }

    /// Serve these forecast samples instead of the five-day fixture
    pub fn with_forecast(mut self, samples: Vec<ForecastSample>) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn failing_current(mut self) -> Self {
        self.fail_current = true;
        self
    }

    pub fn failing_forecast(mut self) -> Self {
        self.fail_forecast = true;
        self
    }

    pub fn with_delay(mut self, city: &str, delay: Duration) -> Self {
        self.delays.insert(city.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pause(&self, city: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(city) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl WeatherClient for FakeWeatherClient {
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
        self.pause(city).await;
        if self.fail_current {
            return Err(ProviderError::CityNotFound(city.to_string()));
        }

        Ok(CurrentConditions {
            city: city.to_string(),
            country: "ES".to_string(),
            temperature: self.temperature,
            feels_like: self.temperature - 0.5,
            humidity: 45,
            wind_speed: 3.0,
            condition: self.condition.clone(),
            description: self.condition.to_lowercase(),
            icon: "01d".to_string(),
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>, ProviderError> {
        self.pause(city).await;
        if self.fail_forecast {
            return Err(ProviderError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        if let Some(samples) = &self.samples {
            return Ok(samples.clone());
        }

        let today = fixed_clock()().date_naive();
        Ok(five_day_forecast(today))
    }
}
