//! Normalized API error.
//!
//! Every failed call surfaces as one [`ApiError`] regardless of whether the
//! backend rejected it, the HTTP layer failed, the network was down, or the
//! request never left the client.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::transport::HttpResponse;

/// Message used when a request was sent but nothing came back.
pub const NETWORK_UNAVAILABLE_MESSAGE: &str = "network unavailable or server not responding";

/// Fallback for envelope failures that carry no message.
pub const BUSINESS_FAILURE_MESSAGE: &str = "business failure";

/// Fallback for construction failures that carry no message.
pub const REQUEST_FAILED_MESSAGE: &str = "request failed";

/// Which layer produced the failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// 2xx response whose envelope `code` was non-zero.
    Business,
    /// Non-2xx response.
    Http,
    /// Request sent, no response (offline, DNS, timeout).
    Network,
    /// Request could not be built or issued.
    Request,
}

/// Uniform error returned by [`super::http::HttpClient`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// Envelope code or HTTP status; `None` for network and construction failures.
    pub code: Option<i64>,
    /// The response that triggered the failure, when one was received.
    pub response: Option<Box<HttpResponse>>,
}

impl ApiError {
    #[must_use]
    pub fn business(code: Option<i64>, message: Option<&str>, response: HttpResponse) -> Self {
        Self {
            kind: ErrorKind::Business,
            message: non_empty_or(message, BUSINESS_FAILURE_MESSAGE),
            code,
            response: Some(Box::new(response)),
        }
    }

    #[must_use]
    pub fn http(code: i64, message: String, response: HttpResponse) -> Self {
        Self {
            kind: ErrorKind::Http,
            message,
            code: Some(code),
            response: Some(Box::new(response)),
        }
    }

    #[must_use]
    pub fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            message: NETWORK_UNAVAILABLE_MESSAGE.to_owned(),
            code: None,
            response: None,
        }
    }

    #[must_use]
    pub fn request(message: &str) -> Self {
        Self {
            kind: ErrorKind::Request,
            message: non_empty_or(Some(message), REQUEST_FAILED_MESSAGE),
            code: None,
            response: None,
        }
    }

    /// HTTP status of the attached response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::request(&err.to_string())
    }
}

fn non_empty_or(message: Option<&str>, fallback: &str) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}
