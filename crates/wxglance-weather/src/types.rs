use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Shown for condition codes without a mapping
pub const FALLBACK_EMOJI: &str = "❓";

/// Current conditions for one city, as returned by the last applied fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_display_name: String,
    pub temperature_kelvin: f64,
    /// Primary OpenWeatherMap condition group, e.g. "Clear" or "Rain"
    pub condition_code: String,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn celsius(&self) -> String {
        kelvin_to_celsius(self.temperature_kelvin)
    }

    pub fn emoji(&self) -> &'static str {
        emoji_for(&self.condition_code)
    }
}

/// Convert Kelvin to Celsius, formatted with two decimals.
pub fn kelvin_to_celsius(kelvin: f64) -> String {
    format!("{:.2}", kelvin - KELVIN_OFFSET)
}

/// Emoji for an OpenWeatherMap condition group.
/// See: https://openweathermap.org/weather-conditions
pub fn emoji_for(condition_code: &str) -> &'static str {
    match condition_code {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Thunderstorm" => "⛈️",
        "Drizzle" => "🌦️",
        "Snow" => "❄️",
        "Mist" | "Smoke" | "Haze" | "Dust" | "Fog" | "Sand" => "🌫️",
        "Ash" => "🌋",
        "Squall" => "💨",
        "Tornado" => "🌪️",
        _ => FALLBACK_EMOJI,
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("API key rejected")]
    Unauthorized,
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_to_celsius_freezing_point() {
        assert_eq!(kelvin_to_celsius(273.15), "0.00");
    }

    #[test]
    fn test_kelvin_to_celsius_rounds_to_two_decimals() {
        assert_eq!(kelvin_to_celsius(300.0), "26.85");
        assert_eq!(kelvin_to_celsius(263.15), "-10.00");
    }

    #[test]
    fn test_emoji_clear() {
        assert_eq!(emoji_for("Clear"), "☀️");
    }

    #[test]
    fn test_emoji_unknown_falls_back() {
        assert_eq!(emoji_for("unknown-code"), "❓");
        assert_eq!(emoji_for(""), FALLBACK_EMOJI);
    }

    #[test]
    fn test_emoji_is_case_sensitive() {
        assert_eq!(emoji_for("clear"), FALLBACK_EMOJI);
    }

    #[test]
    fn test_obscured_conditions_share_fog_emoji() {
        for code in ["Mist", "Smoke", "Haze", "Dust", "Fog", "Sand"] {
            assert_eq!(emoji_for(code), "🌫️", "code {code}");
        }
    }

    #[test]
    fn test_snapshot_helpers() {
        let snapshot = WeatherSnapshot {
            city_display_name: "London".to_string(),
            temperature_kelvin: 285.15,
            condition_code: "Rain".to_string(),
            fetched_at: Utc::now(),
        };
        assert_eq!(snapshot.celsius(), "12.00");
        assert_eq!(snapshot.emoji(), "🌧️");
    }
}
