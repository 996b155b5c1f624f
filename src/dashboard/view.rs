use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

use crate::advisory::AdvisoryResult;
use crate::forecast::models::DailySummary;
use crate::format::{celsius, one_decimal, title_case, wind_kmh};
use crate::icons::{self, IconStyle, UNAVAILABLE_ICON};
use crate::weather::models::CurrentConditions;

/// Shown in the forecast area when the forecast request fails
pub const FORECAST_UNAVAILABLE: &str = "Could not load forecast data.";

const CURRENT_UNAVAILABLE: &str = "Data not available. Check spelling or try another city.";

/// Text for every current-conditions display slot
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentView {
    pub location: String,
    pub timestamp: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind_speed: String,
    pub feels_like: String,
    pub icon: IconStyle,
}

impl CurrentView {
    pub fn from_conditions(conditions: &CurrentConditions, now: DateTime<Tz>) -> Self {
        Self {
            location: format!("{}, {}", conditions.city, conditions.country),
            timestamp: now.format("%A, %B %-d, %Y at %I:%M %p").to_string(),
            temperature: one_decimal(conditions.temperature),
            description: title_case(&conditions.description),
            humidity: format!("{}%", conditions.humidity),
            wind_speed: wind_kmh(conditions.wind_speed),
            feels_like: celsius(conditions.feels_like),
            icon: icons::classify(&conditions.icon),
        }
    }

    /// Uniform placeholder used when current conditions could not be loaded
    pub fn unavailable() -> Self {
        Self {
            location: "Error".to_string(),
            timestamp: "---".to_string(),
            temperature: "--".to_string(),
            description: CURRENT_UNAVAILABLE.to_string(),
            humidity: "--%".to_string(),
            wind_speed: "-- km/h".to_string(),
            feels_like: "--°C".to_string(),
            icon: UNAVAILABLE_ICON,
        }
    }
}

/// One card in the forecast area
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastCard {
    /// Short weekday, e.g. "Mon"
    pub day_name: String,
    /// Short month and day, e.g. "Oct 19"
    pub date_label: String,
    pub icon: IconStyle,
    pub description: String,
    pub temp_max: String,
    pub temp_min: String,
}

impl From<&DailySummary> for ForecastCard {
    fn from(day: &DailySummary) -> Self {
        Self {
            day_name: day.date.format("%a").to_string(),
            date_label: day.date.format("%b %-d").to_string(),
            icon: day.icon_style,
            description: title_case(&day.description),
            temp_max: celsius(day.temp_max),
            temp_min: celsius(day.temp_min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastArea {
    #[default]
    Empty,
    Cards {
        cards: Vec<ForecastCard>,
    },
    Unavailable {
        message: String,
    },
}

/// Everything the current-conditions request renders
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub view: CurrentView,
    pub advisory: Option<AdvisoryResult>,
}

/// Everything the forecast request renders
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPanel {
    pub area: ForecastArea,
    pub trend: Option<String>,
}
