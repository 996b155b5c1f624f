use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::format::celsius;
use crate::weather::models::CurrentConditions;

/// At or above this temperature (°C) the heat warning applies
pub const HEAT_THRESHOLD_C: f64 = 35.0;

/// Lower bound (°C, inclusive) of the comfortable band
pub const MODERATE_FLOOR_C: f64 = 20.0;

/// Main categories that call for umbrella and waterproof footwear
const WET_CONDITIONS: &[&str] = &["Rain", "Drizzle", "Thunderstorm", "Snow", "Squall", "Tornado"];

/// Main categories considered pleasant inside the comfortable band
const PLEASANT_CONDITIONS: &[&str] = &["Clear", "Clouds", "Mist", "Haze"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Caution,
    HeatWarning,
    Favorable,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdvisoryResult {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AdvisoryThresholds {
    /// Heat warning threshold in °C (inclusive)
    #[serde(default = "default_heat_threshold")]
    pub heat_threshold: f64,

    /// Comfortable band floor in °C (inclusive); the band ends below `heat_threshold`
    #[serde(default = "default_moderate_floor")]
    pub moderate_floor: f64,
}

fn default_heat_threshold() -> f64 {
    HEAT_THRESHOLD_C
}

fn default_moderate_floor() -> f64 {
    MODERATE_FLOOR_C
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            heat_threshold: HEAT_THRESHOLD_C,
            moderate_floor: MODERATE_FLOOR_C,
        }
    }
}

/// Derives a personalized advisory from current conditions
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryEngine {
    thresholds: AdvisoryThresholds,
}

impl AdvisoryEngine {
    pub fn new(thresholds: AdvisoryThresholds) -> Self {
        Self { thresholds }
    }

    /// Rules are checked in order and the first match wins: wet weather,
    /// then heat, then the comfortable band, then the generic fallback.
    pub fn advise(&self, conditions: &CurrentConditions) -> AdvisoryResult {
        let city = &conditions.city;
        let temp = conditions.temperature;
        let category = conditions.condition.as_str();

        if WET_CONDITIONS.contains(&category) {
            return AdvisoryResult {
                message: format!(
                    "It looks like {} in {}! Please take an umbrella and wear waterproof shoes while going outside.",
                    category.to_lowercase(),
                    city
                ),
                severity: Severity::Caution,
            };
        }

        if temp >= self.thresholds.heat_threshold {
            return AdvisoryResult {
                message: format!(
                    "The temperature in {} is very high ({})! Don't forget to put sunscreen and stay hydrated while going out.",
                    city,
                    celsius(temp)
                ),
                severity: Severity::HeatWarning,
            };
        }

        let comfortable =
            temp >= self.thresholds.moderate_floor && temp < self.thresholds.heat_threshold;
        if comfortable && PLEASANT_CONDITIONS.contains(&category) {
            return AdvisoryResult {
                message: format!(
                    "The weather in {} is great today! Not too much rain or heat. Enjoy and roam around the city!",
                    city
                ),
                severity: Severity::Favorable,
            };
        }

        AdvisoryResult {
            message: format!(
                "Check the current conditions in {} to plan your day. Specific advisories are currently not applicable.",
                city
            ),
            severity: Severity::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(temp: f64, category: &str) -> CurrentConditions {
        CurrentConditions {
            city: "Jaipur".to_string(),
            country: "IN".to_string(),
            temperature: temp,
            feels_like: temp,
            humidity: 30,
            wind_speed: 2.0,
            condition: category.to_string(),
            description: category.to_lowercase(),
            icon: "01d".to_string(),
        }
    }

    fn severity(temp: f64, category: &str) -> Severity {
        AdvisoryEngine::default()
            .advise(&conditions(temp, category))
            .severity
    }

    #[test]
    fn test_wet_conditions_are_caution_at_any_temperature() {
        for category in WET_CONDITIONS {
            for temp in [-10.0, 0.0, 22.0, 35.0, 48.5] {
                assert_eq!(severity(temp, category), Severity::Caution, "{category} at {temp}");
            }
        }
    }

    #[test]
    fn test_caution_message_names_city_and_condition() {
        let result = AdvisoryEngine::default().advise(&conditions(12.0, "Thunderstorm"));
        assert_eq!(
            result.message,
            "It looks like thunderstorm in Jaipur! Please take an umbrella and wear waterproof shoes while going outside."
        );
    }

    #[test]
    fn test_heat_threshold_is_inclusive() {
        assert_eq!(severity(35.0, "Clear"), Severity::HeatWarning);
        assert_eq!(severity(41.3, "Dust"), Severity::HeatWarning);
    }

    #[test]
    fn test_heat_message_has_one_decimal_temperature() {
        let result = AdvisoryEngine::default().advise(&conditions(38.26, "Clear"));
        assert_eq!(
            result.message,
            "The temperature in Jaipur is very high (38.3°C)! Don't forget to put sunscreen and stay hydrated while going out."
        );
    }

    #[test]
    fn test_heat_message_rounds_half_up() {
        let result = AdvisoryEngine::default().advise(&conditions(38.25, "Clear"));
        assert!(
            result.message.contains("very high (38.3°C)"),
            "unexpected message: {}",
            result.message
        );
    }

    #[test]
    fn test_just_below_heat_threshold_is_favorable() {
        assert_eq!(severity(34.9, "Clear"), Severity::Favorable);
    }

    #[test]
    fn test_moderate_floor_is_inclusive() {
        assert_eq!(severity(20.0, "Clouds"), Severity::Favorable);
        assert_eq!(severity(19.9, "Clouds"), Severity::Neutral);
    }

    #[test]
    fn test_pleasant_categories() {
        for category in PLEASANT_CONDITIONS {
            assert_eq!(severity(25.0, category), Severity::Favorable, "{category}");
        }
    }

    #[test]
    fn test_other_categories_in_band_are_neutral() {
        assert_eq!(severity(25.0, "Dust"), Severity::Neutral);
        assert_eq!(severity(25.0, "Smoke"), Severity::Neutral);
    }

    #[test]
    fn test_neutral_message_names_city() {
        let result = AdvisoryEngine::default().advise(&conditions(5.0, "Clear"));
        assert_eq!(result.severity, Severity::Neutral);
        assert!(result.message.starts_with("Check the current conditions in Jaipur"));
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = AdvisoryEngine::new(AdvisoryThresholds {
            heat_threshold: 30.0,
            moderate_floor: 15.0,
        });
        assert_eq!(engine.advise(&conditions(30.0, "Clear")).severity, Severity::HeatWarning);
        assert_eq!(engine.advise(&conditions(15.0, "Haze")).severity, Severity::Favorable);
    }

    #[test]
    fn test_severity_serializes_kebab_case() {
        let json = serde_json::to_string(&Severity::HeatWarning).expect("serializes");
        assert_eq!(json, "\"heat-warning\"");
    }
}
