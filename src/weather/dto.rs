use serde::Deserialize;

use crate::weather::normalize::NormalizedWeather;

/// Request body for POST / PUT on `/weather-data/`. Every field is required;
/// the body is an explicit full replacement, never a partial patch.
#[derive(Debug, Deserialize)]
pub struct WeatherBody {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub wind_deg: i64,
    pub description: String,
    pub visibility: i64,
    pub sunrise: String,
    pub sunset: String,
    pub timestamp: String,
}

impl From<WeatherBody> for NormalizedWeather {
    fn from(body: WeatherBody) -> Self {
        Self {
            city: Some(body.city),
            country: Some(body.country),
            temperature: Some(body.temperature),
            humidity: Some(body.humidity),
            pressure: Some(body.pressure),
            wind_speed: Some(body.wind_speed),
            wind_deg: Some(body.wind_deg),
            description: Some(body.description),
            visibility: Some(body.visibility),
            sunrise: Some(body.sunrise),
            sunset: Some(body.sunset),
            timestamp: Some(body.timestamp),
        }
    }
}

/// Body for POST `/fetch-and-save/`.
#[derive(Debug, Deserialize)]
pub struct CityBody {
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_apply() {
        let p: Pagination = serde_json::from_str("{}").expect("decode");
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn body_missing_field_is_rejected() {
        let err = serde_json::from_str::<WeatherBody>(r#"{"city": "London"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
