use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::models::{CurrentConditions, OwmCurrentResponse, OwmForecastItem, OwmForecastResponse};
use crate::error::HttpError;
use crate::forecast::models::ForecastSample;
use crate::impl_into_response;

/// Measurement system sent with every request
const UNITS: &str = "metric";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to fetch data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for ProviderError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::RequestError(_) | Self::Status { .. } | Self::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::Status { .. } => Some("PROVIDER_ERROR"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
        }
    }
}

impl_into_response!(ProviderError);

/// Read-only access to the weather provider.
///
/// The two calls are independent: one failing says nothing about the other.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions for a city
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, ProviderError>;

    /// 3-hour forecast samples for a city, ordered by timestamp
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct OwmErrorBody {
    message: String,
}

pub struct OpenWeatherMapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapClient {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(city = %city, endpoint = %endpoint, "Requesting provider data");

        // Query builder handles URL encoding of spaces and special chars
        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, endpoint = %endpoint, "Received provider response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::CityNotFound(city.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwmErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
        let data: OwmCurrentResponse = self.fetch_json("weather", city).await?;
        let conditions = CurrentConditions::try_from(data)?;

        tracing::info!(
            city = %conditions.city,
            temp = %conditions.temperature,
            "Current conditions fetched successfully"
        );

        Ok(conditions)
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>, ProviderError> {
        let data: OwmForecastResponse = self.fetch_json("forecast", city).await?;
        let samples = data
            .list
            .into_iter()
            .map(sample_from_item)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(city = %city, samples = samples.len(), "Forecast fetched successfully");

        Ok(samples)
    }
}

fn sample_from_item(item: OwmForecastItem) -> Result<ForecastSample, ProviderError> {
    let timestamp = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
        ProviderError::InvalidResponse(format!("Timestamp out of range: {}", item.dt))
    })?;
    let weather = item.weather.into_iter().next().ok_or_else(|| {
        ProviderError::InvalidResponse(format!("Forecast entry {} has no weather", item.dt))
    })?;

    Ok(ForecastSample {
        timestamp,
        temperature: item.main.temp,
        condition: weather.main,
        description: weather.description,
        icon: weather.icon,
    })
}
