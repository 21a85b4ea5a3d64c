use serde::Deserialize;

/// Settings for the outbound OpenWeatherMap call.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    /// Response language requested from the provider, e.g. "pt_br".
    pub lang: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub weather: WeatherConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://weatherlog.db".into());
        let weather = WeatherConfig {
            api_key: std::env::var("OPENWEATHER_API_KEY")?,
            base_url: std::env::var("OPENWEATHER_BASE_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/weather".into()
            }),
            lang: std::env::var("OPENWEATHER_LANG").unwrap_or_else(|_| "pt_br".into()),
        };
        Ok(Self {
            database_url,
            weather,
        })
    }
}
