use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::weather::normalize::NormalizedWeather;

/// One stored weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeatherRecord {
    pub id: i64,
    pub city: Option<String>,
    pub country: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<i64>,
    pub pressure: Option<i64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<i64>,
    pub description: Option<String>,
    pub visibility: Option<i64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub timestamp: Option<String>,
}

const COLUMNS: &str = "id, city, country, temperature, humidity, pressure, \
     wind_speed, wind_deg, description, visibility, sunrise, sunset, timestamp";

impl WeatherRecord {
    /// Insert a new observation; the id is assigned here and never changes.
    pub async fn insert(
        db: &SqlitePool,
        data: &NormalizedWeather,
    ) -> anyhow::Result<WeatherRecord> {
        let record = sqlx::query_as::<_, WeatherRecord>(
            r#"
            INSERT INTO weather_records
                (city, country, temperature, humidity, pressure,
                 wind_speed, wind_deg, description, visibility,
                 sunrise, sunset, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, city, country, temperature, humidity, pressure,
                      wind_speed, wind_deg, description, visibility,
                      sunrise, sunset, timestamp
            "#,
        )
        .bind(&data.city)
        .bind(&data.country)
        .bind(data.temperature)
        .bind(data.humidity)
        .bind(data.pressure)
        .bind(data.wind_speed)
        .bind(data.wind_deg)
        .bind(&data.description)
        .bind(data.visibility)
        .bind(&data.sunrise)
        .bind(&data.sunset)
        .bind(&data.timestamp)
        .fetch_one(db)
        .await?;
        Ok(record)
    }

    /// List in insertion order (id ascending), `limit` rows after `skip`.
    pub async fn list(
        db: &SqlitePool,
        skip: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<WeatherRecord>> {
        let rows = sqlx::query_as::<_, WeatherRecord>(&format!(
            "SELECT {COLUMNS} FROM weather_records ORDER BY id ASC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &SqlitePool, id: i64) -> anyhow::Result<Option<WeatherRecord>> {
        let record = sqlx::query_as::<_, WeatherRecord>(&format!(
            "SELECT {COLUMNS} FROM weather_records WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(record)
    }

    /// Full replace of every mutable field; the id is untouched. `None` when
    /// the id does not exist.
    pub async fn update(
        db: &SqlitePool,
        id: i64,
        data: &NormalizedWeather,
    ) -> anyhow::Result<Option<WeatherRecord>> {
        let record = sqlx::query_as::<_, WeatherRecord>(
            r#"
            UPDATE weather_records
            SET city = ?, country = ?, temperature = ?, humidity = ?,
                pressure = ?, wind_speed = ?, wind_deg = ?, description = ?,
                visibility = ?, sunrise = ?, sunset = ?, timestamp = ?
            WHERE id = ?
            RETURNING id, city, country, temperature, humidity, pressure,
                      wind_speed, wind_deg, description, visibility,
                      sunrise, sunset, timestamp
            "#,
        )
        .bind(&data.city)
        .bind(&data.country)
        .bind(data.temperature)
        .bind(data.humidity)
        .bind(data.pressure)
        .bind(data.wind_speed)
        .bind(data.wind_deg)
        .bind(&data.description)
        .bind(data.visibility)
        .bind(&data.sunrise)
        .bind(&data.sunset)
        .bind(&data.timestamp)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(record)
    }

    /// Delete and return the removed row, `None` when the id does not exist.
    pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<Option<WeatherRecord>> {
        let record = sqlx::query_as::<_, WeatherRecord>(&format!(
            "DELETE FROM weather_records WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(record)
    }
}
