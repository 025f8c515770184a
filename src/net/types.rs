//! Wire DTOs for the user endpoints and the response envelope.
//!
//! DESIGN
//! ======
//! These mirror the backend's pydantic schemas so serde round-trips stay
//! lossless; timestamps stay as strings because the client only displays them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform backend reply: `{ code, message, data, timestamp }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// `0` on success, anything else is a business failure.
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: T,
    #[serde(default)]
    pub timestamp: Value,
}

impl<T> Envelope<T> {
    /// Successful envelope wrapping `data`.
    pub fn ok(data: T, timestamp: Value) -> Self {
        Self { code: 0, message: "ok".to_owned(), data, timestamp }
    }
}

impl Envelope<Value> {
    /// Failed envelope with a `null` payload.
    #[must_use]
    pub fn failure(code: i64, message: &str, timestamp: Value) -> Self {
        Self { code, message: message.to_owned(), data: Value::Null, timestamp }
    }
}

/// Public profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /user/login`; `username` also accepts an email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Body of `POST /user/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
