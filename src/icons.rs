use serde::Serialize;
use utoipa::ToSchema;

/// Display color category for a weather glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Warning,
    Info,
    Secondary,
    Primary,
    Danger,
    White,
    Muted,
}

/// Glyph + color pair shown for a condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct IconStyle {
    #[schema(value_type = String)]
    pub glyph: &'static str,
    pub color: ColorCategory,
}

impl IconStyle {
    const fn new(glyph: &'static str, color: ColorCategory) -> Self {
        Self { glyph, color }
    }
}

/// Returned for any code missing from the table
pub const FALLBACK_ICON: IconStyle = IconStyle::new("question-circle", ColorCategory::Secondary);

/// Shown in the icon slot when current conditions could not be loaded
pub const UNAVAILABLE_ICON: IconStyle =
    IconStyle::new("exclamation-triangle", ColorCategory::Danger);

// OpenWeatherMap icon codes, day (d) and night (n) variants
const ICON_TABLE: &[(&str, IconStyle)] = &[
    // Clear sky
    ("01d", IconStyle::new("sun", ColorCategory::Warning)),
    ("01n", IconStyle::new("moon", ColorCategory::Info)),
    // Few clouds
    ("02d", IconStyle::new("cloud-sun", ColorCategory::Warning)),
    ("02n", IconStyle::new("cloud-moon", ColorCategory::Info)),
    // Scattered clouds
    ("03d", IconStyle::new("cloud", ColorCategory::Secondary)),
    ("03n", IconStyle::new("cloud", ColorCategory::Secondary)),
    // Broken clouds
    ("04d", IconStyle::new("cloud-meatball", ColorCategory::Secondary)),
    ("04n", IconStyle::new("cloud-meatball", ColorCategory::Secondary)),
    // Shower rain
    ("09d", IconStyle::new("cloud-showers-heavy", ColorCategory::Primary)),
    ("09n", IconStyle::new("cloud-showers-heavy", ColorCategory::Primary)),
    // Rain
    ("10d", IconStyle::new("cloud-sun-rain", ColorCategory::Primary)),
    ("10n", IconStyle::new("cloud-moon-rain", ColorCategory::Primary)),
    // Thunderstorm
    ("11d", IconStyle::new("bolt", ColorCategory::Danger)),
    ("11n", IconStyle::new("bolt", ColorCategory::Danger)),
    // Snow
    ("13d", IconStyle::new("snowflake", ColorCategory::White)),
    ("13n", IconStyle::new("snowflake", ColorCategory::White)),
    // Mist / fog
    ("50d", IconStyle::new("smog", ColorCategory::Muted)),
    ("50n", IconStyle::new("smog", ColorCategory::Muted)),
];

/// Map a provider condition code to its display glyph and color.
///
/// Total: unknown codes map to [`FALLBACK_ICON`].
pub fn classify(code: &str) -> IconStyle {
    ICON_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, style)| *style)
        .unwrap_or(FALLBACK_ICON)
}
