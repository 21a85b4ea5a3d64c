use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::{ApiError, AppJson};
use crate::state::AppState;
use crate::weather::dto::{CityBody, Pagination, WeatherBody};
use crate::weather::normalize::NormalizedWeather;
use crate::weather::repo::WeatherRecord;
use crate::weather::service::fetch_and_save;

const NOT_FOUND: &str = "Weather record not found";

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/weather-data/", get(list_records))
        .route("/weather-data/:id", get(get_record))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/weather-data/", post(create_record))
        .route("/weather-data/:id", put(update_record).delete(delete_record))
        .route("/fetch-and-save/", post(fetch_and_save_record))
}

#[instrument(skip(state, body))]
async fn create_record(
    State(state): State<AppState>,
    AppJson(body): AppJson<WeatherBody>,
) -> Result<(StatusCode, HeaderMap, Json<WeatherRecord>), ApiError> {
    let data = NormalizedWeather::from(body);
    let record = WeatherRecord::insert(&state.db, &data).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/weather-data/{}", record.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(id = record.id, "weather record created");
    Ok((StatusCode::CREATED, headers, Json(record)))
}

#[instrument(skip(state))]
async fn list_records(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<WeatherRecord>>, ApiError> {
    if p.skip < 0 {
        return Err(ApiError::Validation(vec!["skip must be non-negative".into()]));
    }
    if p.limit <= 0 {
        return Err(ApiError::Validation(vec!["limit must be positive".into()]));
    }

    let records = WeatherRecord::list(&state.db, p.skip, p.limit).await?;
    Ok(Json(records))
}

#[instrument(skip(state))]
async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let record = WeatherRecord::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(Json(record))
}

#[instrument(skip(state, body))]
async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<WeatherBody>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let data = NormalizedWeather::from(body);
    let record = WeatherRecord::update(&state.db, id, &data)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!(id, "weather record updated");
    Ok(Json(record))
}

#[instrument(skip(state))]
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let record = WeatherRecord::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    info!(id, "weather record deleted");
    Ok(Json(record))
}

#[instrument(skip(state, body))]
async fn fetch_and_save_record(
    State(state): State<AppState>,
    AppJson(body): AppJson<CityBody>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let record = fetch_and_save(state.weather.as_ref(), &state.db, &body.city).await?;
    info!(id = record.id, city = %body.city, "weather record fetched and saved");
    Ok(Json(record))
}
