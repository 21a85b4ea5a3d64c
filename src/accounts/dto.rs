use serde::{Deserialize, Serialize};

/// Request body for registration. The plaintext password lives only for the
/// duration of the request.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Client-facing part of an account; never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: i64,
    pub email: String,
}
