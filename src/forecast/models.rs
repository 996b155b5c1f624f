use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::format::{capitalize, celsius};
use crate::icons::IconStyle;

/// One 3-hour forecast slot, metric units
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    /// Main category, e.g. "Clouds"
    pub condition: String,
    pub description: String,
    /// Provider icon code, e.g. "04d"
    pub icon: String,
}

/// Per-day summary of the forecast samples falling on one local date
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Icon code of the first sample of the day
    pub icon: String,
    /// Description of the first sample of the day
    pub description: String,
    pub icon_style: IconStyle,
}

/// Overall trend across every retained sample
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
pub struct TrendSummary {
    pub temp_min: f64,
    pub temp_max: f64,
    /// Most frequent main category; first to reach the top count wins ties
    pub most_frequent: String,
    /// Number of samples considered (today excluded)
    pub sample_count: usize,
    /// Number of daily summaries produced
    pub days_covered: usize,
}

impl TrendSummary {
    /// A zero-count summary carries nothing worth displaying
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Plain-English summary paragraph, or `None` when there is nothing to say
    pub fn text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        Some(format!(
            "For the next {} days, the highest temperature will be {} and the lowest temperature will be {}. \
             The weather forecast shows a high chance of {} during this period. \
             Find daily details in the cards below.",
            self.days_covered,
            celsius(self.temp_max),
            celsius(self.temp_min),
            capitalize(&self.most_frequent)
        ))
    }
}

/// Aggregated forecast: daily summaries plus the overall trend
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastOutlook {
    pub days: Vec<DailySummary>,
    pub trend: TrendSummary,
}
