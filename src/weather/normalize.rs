use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::weather::client::RawWeather;

/// Flat observation matching the storage schema, id not yet assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWeather {
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

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    /// The provider documents at least one `weather` entry; an empty array
    /// means the payload is not a current-weather observation.
    #[error("weather payload has no conditions entry")]
    EmptyConditions,
}

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Epoch seconds to a "YYYY-MM-DD HH:MM:SS" string, UTC. Out-of-range epochs
/// are treated like a missing key.
fn format_epoch(secs: i64) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .and_then(|t| t.format(&TIMESTAMP_FORMAT).ok())
}

/// Flatten a raw provider payload into the storage shape. Pure; any missing
/// optional key becomes `None`, only an empty conditions array is an error.
pub fn normalize(raw: RawWeather) -> Result<NormalizedWeather, NormalizeError> {
    let first = raw
        .weather
        .into_iter()
        .next()
        .ok_or(NormalizeError::EmptyConditions)?;

    Ok(NormalizedWeather {
        city: raw.name,
        country: raw.sys.country,
        temperature: raw.main.temp,
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_speed: raw.wind.speed,
        wind_deg: raw.wind.deg,
        description: first.description,
        visibility: raw.visibility,
        sunrise: raw.sys.sunrise.and_then(format_epoch),
        sunset: raw.sys.sunset.and_then(format_epoch),
        timestamp: raw.dt.and_then(format_epoch),
    })
}
