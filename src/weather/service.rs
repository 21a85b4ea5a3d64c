use sqlx::SqlitePool;
use tracing::warn;

use crate::error::ApiError;
use crate::weather::client::WeatherProvider;
use crate::weather::normalize::normalize;
use crate::weather::repo::WeatherRecord;

/// Fetch the current observation for `city`, flatten it and persist it.
///
/// The fetch and the insert are deliberately not transactional: a failed
/// insert after a successful fetch loses the payload and the caller
/// re-fetches. A failed fetch writes nothing.
pub async fn fetch_and_save(
    provider: &dyn WeatherProvider,
    db: &SqlitePool,
    city: &str,
) -> Result<WeatherRecord, ApiError> {
    let raw = provider.fetch(city).await.map_err(|e| {
        warn!(city, error = %e, "weather fetch failed");
        ApiError::ExternalUnavailable(e.to_string())
    })?;

    let data = normalize(raw).map_err(|e| {
        warn!(city, error = %e, "weather payload unusable");
        ApiError::ExternalUnavailable(e.to_string())
    })?;

    let record = WeatherRecord::insert(db, &data).await?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::weather::client::{
        ProviderError, RawCondition, RawMain, RawSys, RawWeather, RawWind,
    };
    use async_trait::async_trait;

    struct FakeProvider {
        response: Result<RawWeather, u16>,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn fetch(&self, _city: &str) -> Result<RawWeather, ProviderError> {
            match &self.response {
                Ok(raw) => Ok(raw.clone()),
                Err(status) => Err(ProviderError::Status(*status)),
            }
        }
    }

    fn london_payload() -> RawWeather {
        RawWeather {
            name: Some("London".into()),
            sys: RawSys {
                country: Some("GB".into()),
                sunrise: Some(1_700_000_000),
                sunset: Some(1_700_040_000),
            },
            main: RawMain {
                temp: Some(15.2),
                humidity: Some(80),
                pressure: Some(1012),
            },
            wind: RawWind {
                speed: Some(3.1),
                deg: Some(200),
            },
            weather: vec![RawCondition {
                description: Some("clear sky".into()),
            }],
            visibility: Some(10_000),
            dt: Some(1_700_010_000),
        }
    }

    async fn count(db: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM weather_records")
            .fetch_one(db)
            .await
            .expect("count")
    }

    #[tokio::test]
    async fn successful_fetch_writes_one_row() {
        let db = test_pool().await;
        let provider = FakeProvider {
            response: Ok(london_payload()),
        };

        let record = fetch_and_save(&provider, &db, "London").await.expect("save");
        assert_eq!(record.city.as_deref(), Some("London"));
        assert_eq!(record.timestamp.as_deref(), Some("2023-11-15 01:00:00"));
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let db = test_pool().await;
        let provider = FakeProvider { response: Err(404) };

        let err = fetch_and_save(&provider, &db, "Atlantis").await.unwrap_err();
        assert!(matches!(err, ApiError::ExternalUnavailable(_)));
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn empty_conditions_payload_writes_nothing() {
        let db = test_pool().await;
        let mut payload = london_payload();
        payload.weather.clear();
        let provider = FakeProvider {
            response: Ok(payload),
        };

        let err = fetch_and_save(&provider, &db, "London").await.unwrap_err();
        assert!(matches!(err, ApiError::ExternalUnavailable(_)));
        assert_eq!(count(&db).await, 0);
    }
}
