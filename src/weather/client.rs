use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::WeatherConfig;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw OpenWeatherMap "current weather" payload, decoded as-is. Every key the
/// provider may omit is optional; tolerance is the normalizer's job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeather {
    pub name: Option<String>,
    #[serde(default)]
    pub sys: RawSys,
    #[serde(default)]
    pub main: RawMain,
    #[serde(default)]
    pub wind: RawWind,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub visibility: Option<i64>,
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSys {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMain {
    pub temp: Option<f64>,
    pub humidity: Option<i64>,
    pub pressure: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWind {
    pub speed: Option<f64>,
    pub deg: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One outbound call per invocation; no retry, no backoff.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<RawWeather, ProviderError>;
}

/// OpenWeatherMap client. Requests metric units and a fixed response
/// language; everything else rides on the provider's defaults.
pub struct OpenWeather {
    http: Client,
    config: WeatherConfig,
}

impl OpenWeather {
    pub fn new(config: WeatherConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeather {
    async fn fetch(&self, city: &str) -> Result<RawWeather, ProviderError> {
        let res = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, city, "provider answered non-success");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let payload = res.json::<RawWeather>().await?;
        Ok(payload)
    }
}
