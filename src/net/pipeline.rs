//! Request and response stages run around every transport call.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`super::http::HttpClient`] applies request stages in order, sends, then
//! feeds the settled result through response stages in order. A stage that
//! rejects inside `on_fulfilled` hands its rejection to the *next* stage's
//! `on_rejected`, never its own.
//!
//! The standard pipeline is `[BearerAuth]` then `[UnwrapEnvelope]`.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, ResponseType, TransportError};
use crate::util::credential::CredentialStore;

/// Result of a call once the response stages have run.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Unwrapped envelope data, or a non-envelope body passed through.
    Data(Value),
    /// Untouched response (binary downloads, or no envelope stage installed).
    Raw(HttpResponse),
}

impl Payload {
    /// Decode the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `Request` when the payload does not
    /// match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Data(value) => Ok(serde_json::from_value(value)?),
            Self::Raw(resp) => Ok(serde_json::from_slice(&resp.body)?),
        }
    }

    #[must_use]
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Raw(_) => None,
        }
    }
}

/// Failure travelling through the response stages before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    /// Response received with a non-2xx status.
    Status(HttpResponse),
    /// No response was obtained.
    Transport(TransportError),
    /// Already normalized by an earlier stage.
    Api(ApiError),
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Status(resp) => normalize_status(resp),
            Rejection::Transport(TransportError::NoResponse(_)) => ApiError::network(),
            Rejection::Transport(TransportError::Build(message)) => ApiError::request(&message),
            Rejection::Api(err) => err,
        }
    }
}

/// Mutates an outgoing request. Must not fail.
pub trait RequestStage: Send + Sync {
    fn on_request(&self, request: &mut HttpRequest);
}

/// Transforms the settled result of a call.
pub trait ResponseStage: Send + Sync {
    /// Called with a 2xx response (or a previous stage's payload).
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] to turn the success into a failure.
    fn on_fulfilled(&self, request: &HttpRequest, payload: Payload) -> Result<Payload, Rejection> {
        let _ = request;
        Ok(payload)
    }

    /// Called with a failure from the transport or a previous stage.
    fn on_rejected(&self, request: &HttpRequest, rejection: Rejection) -> Rejection {
        let _ = request;
        rejection
    }
}

/// Signs requests with `Authorization: Bearer <token>` when a token is stored.
#[derive(Clone)]
pub struct BearerAuth {
    credentials: Arc<dyn CredentialStore>,
}

impl BearerAuth {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }
}

impl RequestStage for BearerAuth {
    fn on_request(&self, request: &mut HttpRequest) {
        if let Some(token) = self.credentials.get() {
            request.set_header("Authorization", &format!("Bearer {token}"));
        }
    }
}

/// Unwraps `{ code, message, data, timestamp }` replies and normalizes failures.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnwrapEnvelope;

impl ResponseStage for UnwrapEnvelope {
    fn on_fulfilled(&self, request: &HttpRequest, payload: Payload) -> Result<Payload, Rejection> {
        match payload {
            Payload::Raw(resp) => unwrap_response(request.response_type, resp),
            data @ Payload::Data(_) => Ok(data),
        }
    }

    fn on_rejected(&self, _request: &HttpRequest, rejection: Rejection) -> Rejection {
        Rejection::Api(ApiError::from(rejection))
    }
}

fn unwrap_response(response_type: ResponseType, resp: HttpResponse) -> Result<Payload, Rejection> {
    if response_type.is_binary() || resp.content_type().contains("octet-stream") {
        return Ok(Payload::Raw(resp));
    }
    if response_type == ResponseType::Text {
        return Ok(Payload::Data(Value::String(resp.text())));
    }

    let mut body = match parse_body(&resp) {
        Value::Object(map) => map,
        other => return Ok(Payload::Data(other)),
    };
    let Some(code) = body.get("code").map(Value::as_i64) else {
        return Ok(Payload::Data(Value::Object(body)));
    };
    let message = body.get("message").and_then(Value::as_str).map(str::to_owned);

    if let Some(data) = body.remove("data") {
        if code == Some(0) {
            return Ok(Payload::Data(data));
        }
        return Err(Rejection::Api(ApiError::business(code, message.as_deref(), resp)));
    }
    // Failure replies sometimes drop `data` entirely.
    if message.is_some() && code.is_some_and(|c| c != 0) {
        return Err(Rejection::Api(ApiError::business(code, message.as_deref(), resp)));
    }
    Ok(Payload::Data(Value::Object(body)))
}

fn parse_body(resp: &HttpResponse) -> Value {
    if resp.body.is_empty() {
        return Value::Null;
    }
    resp.json_body().unwrap_or_else(|| Value::String(resp.text()))
}

fn normalize_status(resp: HttpResponse) -> ApiError {
    let body = resp.json_body();
    let envelope = body.as_ref().and_then(Value::as_object);
    let message = envelope
        .and_then(|o| o.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(|| format!("HTTP {}", resp.status), str::to_owned);
    let code = envelope
        .and_then(|o| o.get("code"))
        .and_then(Value::as_i64)
        .unwrap_or_else(|| i64::from(resp.status));
    ApiError::http(code, message, resp)
}
