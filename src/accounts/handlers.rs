use axum::{extract::State, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::accounts::dto::{PublicAccount, RegisterRequest};
use crate::accounts::password::hash_password;
use crate::accounts::repo::{is_unique_violation, Account};
use crate::error::{ApiError, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/register/", post(register))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<PublicAccount>, ApiError> {
    let account = register_account(&state.db, &payload.email, &payload.password).await?;
    Ok(Json(PublicAccount {
        id: account.id,
        email: account.email,
    }))
}

/// Validate, check for a duplicate, hash and insert. The pre-check answers
/// the common case; a racing insert that trips the UNIQUE constraint is also
/// reported as Conflict.
pub async fn register_account(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Account, ApiError> {
    let email = email.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    if password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    if Account::find_by_email(db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    let hash = hash_password(password)?;

    let account = match Account::create(db, &email, &hash).await {
        Ok(account) => account,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email registered concurrently");
            return Err(ApiError::Conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    info!(account_id = account.id, email = %account.email, "account registered");
    Ok(account)
}
