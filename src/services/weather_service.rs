use reqwest::Client;
use serde_json::Value;

use crate::{config::WeatherConfig, error::AppError};

const WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather lookup is not configured")]
    NotConfigured,

    #[error("weather request failed: {0}")]
    Transport(reqwest::Error),

    #[error("weather service returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("weather payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

// The request URL carries the API key, so it never travels with the error.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url())
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::NotConfigured => AppError::service_unavailable(err.to_string()),
            _ => AppError::bad_gateway(err.to_string()),
        }
    }
}

/// The fields the weather page shows, lifted out of the raw payload.
/// Anything the upstream omitted stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub city: Option<String>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<i64>,
    pub description: Option<String>,
    pub raw: Value,
}

impl WeatherReport {
    pub fn from_payload(raw: Value) -> Self {
        let main = raw.get("main");
        Self {
            city: raw.get("name").and_then(Value::as_str).map(str::to_string),
            temperature: main.and_then(|m| m.get("temp")).and_then(Value::as_f64),
            feels_like: main.and_then(|m| m.get("feels_like")).and_then(Value::as_f64),
            humidity: main.and_then(|m| m.get("humidity")).and_then(Value::as_i64),
            description: raw
                .get("weather")
                .and_then(|w| w.get(0))
                .and_then(|w| w.get("description"))
                .and_then(Value::as_str)
                .map(str::to_string),
            raw,
        }
    }
}

pub struct WeatherService<'a> {
    client: &'a Client,
    cfg: &'a WeatherConfig,
}

impl<'a> WeatherService<'a> {
    pub fn new(client: &'a Client, cfg: &'a WeatherConfig) -> Self {
        Self { client, cfg }
    }

    fn endpoint(&self) -> String {
        format!("{}{WEATHER_PATH}", self.cfg.base_url.trim_end_matches('/'))
    }

    /// Current conditions for the configured city, imperial units. The
    /// payload is returned as received.
    pub async fn current(&self) -> Result<Value, WeatherError> {
        if !self.cfg.enabled() {
            return Err(WeatherError::NotConfigured);
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("q", self.cfg.city.as_str()),
                ("appid", self.cfg.api_key.as_str()),
                ("units", "imperial"),
            ])
            .timeout(self.cfg.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn report(&self) -> Result<WeatherReport, WeatherError> {
        let payload = self.current().await.inspect_err(|err| {
            tracing::warn!(city = %self.cfg.city, "weather lookup failed: {err}");
        })?;
        Ok(WeatherReport::from_payload(payload))
    }
}
