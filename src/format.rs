//! Text formatting shared by the dashboard views and summaries.

/// Conversion factor from meters per second to kilometers per hour
const MPS_TO_KMH: f64 = 3.6;

/// Uppercase the first character of every space-separated word
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One decimal place, halves rounded away from zero ("20.25" -> "20.3").
///
/// `{:.1}` alone rounds exact ties to even, which would print 20.2.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// One decimal place with a Celsius suffix, e.g. "21.5°C"
pub fn celsius(value: f64) -> String {
    format!("{}°C", one_decimal(value))
}

/// Wind speed in km/h from m/s, one decimal place
pub fn wind_kmh(meters_per_second: f64) -> String {
    format!("{} km/h", one_decimal(meters_per_second * MPS_TO_KMH))
}
