use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open the pool, creating the database file if it does not exist yet.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("parse DATABASE_URL")?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Create the two tables if absent. No migration versioning; the schema is
/// small enough to be declared in place at startup.
pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_records (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            city        TEXT,
            country     TEXT,
            temperature REAL,
            humidity    INTEGER,
            pressure    INTEGER,
            wind_speed  REAL,
            wind_deg    INTEGER,
            description TEXT,
            visibility  INTEGER,
            sunrise     TEXT,
            sunset      TEXT,
            timestamp   TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // A pool with more than one connection to ":memory:" would open a fresh
    // empty database per connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    ensure_schema(&pool).await.expect("create schema");
    pool
}
