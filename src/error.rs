use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the HTTP surface. Every request fails independently;
/// nothing here is retried or queued.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    /// The weather provider was unreachable or answered non-success.
    #[error("could not fetch weather data: {0}")]
    ExternalUnavailable(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("validation error")]
    Validation(Vec<String>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, json!({ "message": msg }))
            }
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, json!({ "message": msg }))
            }
            // The fetch-and-save contract surfaces a failed external fetch
            // as 404: no data for that city.
            ApiError::ExternalUnavailable(msg) => {
                (StatusCode::NOT_FOUND, json!({ "message": msg }))
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "message": "Validation error", "details": details }),
            ),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// `axum::Json` wrapper that reports malformed bodies as a structured 422
/// instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::Validation(vec![rejection_detail(rejection)])),
        }
    }
}

fn rejection_detail(rejection: JsonRejection) -> String {
    rejection.body_text()
}
