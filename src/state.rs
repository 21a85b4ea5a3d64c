use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::weather::client::{OpenWeather, WeatherProvider};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::connect(&config.database_url).await?;
        db::ensure_schema(&pool).await?;

        let weather =
            Arc::new(OpenWeather::new(config.weather.clone())?) as Arc<dyn WeatherProvider>;

        Ok(Self {
            db: pool,
            config,
            weather,
        })
    }
}
