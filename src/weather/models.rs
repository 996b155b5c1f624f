use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::client::ProviderError;

// ============================================================================
// OpenWeatherMap Response (Internal)
// These structs deserialize the raw API response; not all fields are used
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OwmCurrentResponse {
    pub name: String,
    pub sys: OwmSys,
    pub main: OwmMain,
    pub wind: OwmWind,
    pub weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OwmSys {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub struct OwmWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OwmCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// 5 day / 3 hour forecast response
#[derive(Debug, Deserialize)]
pub struct OwmForecastResponse {
    pub list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct OwmForecastItem {
    pub dt: i64,
    pub main: OwmForecastMain,
    pub weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OwmForecastMain {
    pub temp: f64,
}

// ============================================================================
// Domain Models
// ============================================================================

/// Current conditions for one location, metric units
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Degrees Celsius
    pub feels_like: f64,
    /// Percent
    pub humidity: u32,
    /// Meters per second
    pub wind_speed: f64,
    /// Main category, e.g. "Rain"
    pub condition: String,
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
}

impl TryFrom<OwmCurrentResponse> for CurrentConditions {
    type Error = ProviderError;

    fn try_from(data: OwmCurrentResponse) -> Result<Self, Self::Error> {
        let weather = data.weather.into_iter().next().ok_or_else(|| {
            ProviderError::InvalidResponse("No weather information available".to_string())
        })?;

        Ok(Self {
            city: data.name,
            country: data.sys.country,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
        })
    }
}
