//! In-bundle mock backend used when `APP_USE_MOCK` is on.
//!
//! Answers the user endpoints with the same envelopes the real API sends, so
//! the guard and pages behave identically with no server running.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "mock_test.rs"]
mod mock_test;

use async_trait::async_trait;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use super::types::{Envelope, LoginRequest, LoginResponse, RegisterRequest, UserProfile};

/// Token issued by the mock login and accepted by the mock profile check.
pub const MOCK_TOKEN: &str = "mock-token";

const MOCK_USERNAME: &str = "demo";
const MOCK_EMAIL: &str = "demo@example.com";
const MOCK_DATE: &str = "2024-01-01T00:00:00";

#[derive(Clone, Debug, Default)]
pub struct MockTransport;

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(respond(&request))
    }
}

fn respond(request: &HttpRequest) -> HttpResponse {
    let path = request.url.split(['?', '#']).next().unwrap_or_default();
    match (request.method, path) {
        (Method::Post, p) if p.ends_with("/user/login") => login(request),
        (Method::Post, p) if p.ends_with("/user/register") => register(request),
        (Method::Get, p) if p.ends_with("/user/profile") => profile(request),
        _ => failure(404, "not found"),
    }
}

fn login(request: &HttpRequest) -> HttpResponse {
    let Some(form) = parse_body::<LoginRequest>(request) else {
        return failure(400, "invalid request body");
    };
    if form.username.trim().is_empty() || form.password.is_empty() {
        return failure(401, "invalid username or password");
    }
    success(&LoginResponse {
        access_token: MOCK_TOKEN.to_owned(),
        token_type: "bearer".to_owned(),
    })
}

fn register(request: &HttpRequest) -> HttpResponse {
    let Some(form) = parse_body::<RegisterRequest>(request) else {
        return failure(400, "invalid request body");
    };
    success(&mock_profile(&form.username, &form.email, form.bio))
}

fn profile(request: &HttpRequest) -> HttpResponse {
    let expected = format!("Bearer {MOCK_TOKEN}");
    if request.header("authorization") != Some(expected.as_str()) {
        return failure(401, "invalid or expired token");
    }
    success(&mock_profile(MOCK_USERNAME, MOCK_EMAIL, None))
}

fn mock_profile(username: &str, email: &str, bio: Option<String>) -> UserProfile {
    UserProfile {
        id: 1,
        username: username.to_owned(),
        email: email.to_owned(),
        bio,
        last_login: None,
        created_at: MOCK_DATE.to_owned(),
        updated_at: MOCK_DATE.to_owned(),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(request: &HttpRequest) -> Option<T> {
    serde_json::from_str(request.body.as_deref()?).ok()
}

fn success<T: serde::Serialize>(data: &T) -> HttpResponse {
    let data = serde_json::to_value(data).unwrap_or(Value::Null);
    let envelope = Envelope::ok(data, now_seconds());
    HttpResponse::json(200, &serde_json::to_value(envelope).unwrap_or(Value::Null))
}

fn failure(status: u16, message: &str) -> HttpResponse {
    let envelope = Envelope::failure(i64::from(status), message, now_seconds());
    HttpResponse::json(status, &serde_json::to_value(envelope).unwrap_or(Value::Null))
}

#[allow(clippy::cast_possible_truncation)]
fn now_seconds() -> Value {
    #[cfg(feature = "csr")]
    {
        Value::from((js_sys::Date::now() / 1000.0) as i64)
    }
    #[cfg(not(feature = "csr"))]
    {
        Value::from(0)
    }
}
