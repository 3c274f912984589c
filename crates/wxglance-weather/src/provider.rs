//! OpenWeatherMap current-weather client.

use crate::types::{WeatherError, WeatherSnapshot};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const USER_AGENT: &str = concat!("wxglance/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    /// Provider against any OpenWeatherMap-compatible base URL.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for `city`.
    ///
    /// The city is sent exactly as given (only URL-encoded).
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, city, &body));
        }

        let parsed: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let condition_code = parsed
            .weather
            .into_iter()
            .next()
            .map(|entry| entry.main)
            .ok_or_else(|| WeatherError::Parse("response has no weather entries".to_string()))?;

        let snapshot = WeatherSnapshot {
            city_display_name: parsed.name,
            temperature_kelvin: parsed.main.temp,
            condition_code,
            fetched_at: Utc::now(),
        };

        tracing::debug!(
            "Fetched weather for {}: {} K, {}",
            snapshot.city_display_name,
            snapshot.temperature_kelvin,
            snapshot.condition_code
        );
        Ok(snapshot)
    }

    fn status_error(status: StatusCode, city: &str, body: &str) -> WeatherError {
        match status {
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
            _ => {
                let message = serde_json::from_str::<ApiErrorBody>(body)
                    .ok()
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
                WeatherError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
