//! Transport seam between the API client and the browser's HTTP stack.
//!
//! DESIGN
//! ======
//! [`Transport`] only moves bytes: every status comes back as an
//! [`HttpResponse`], and only "no response" or "could not build" are errors.
//! Status interpretation and envelope handling belong to the pipeline.
//!
//! Client-side (csr): [`GlooTransport`] issues real `fetch` calls via `gloo-net`.
//! Natively it reports a construction failure, so only scripted or mock
//! transports are useful outside the browser.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use serde::Serialize;

use super::mock::MockTransport;

/// HTTP verb of an [`HttpRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Shape the caller expects back; binary types skip envelope unwrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseType {
    #[default]
    Json,
    Text,
    Blob,
    ArrayBuffer,
}

impl ResponseType {
    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Blob | Self::ArrayBuffer)
    }
}

/// Outgoing request as seen by pipeline stages and transports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the client's base URL, or an absolute `http(s)://` URL.
    /// The client rewrites it to the final URL before stages run.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
    pub response_type: ResponseType,
    /// `None` means "use the client default".
    pub timeout_ms: Option<u32>,
    pub with_credentials: bool,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            response_type: ResponseType::default(),
            timeout_ms: None,
            with_credentials: false,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Attach `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `body` cannot be serialized.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Insert or replace a header, matching names case-insensitively.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            slot.1 = value.to_owned();
        } else {
            self.headers.push((name.to_owned(), value.to_owned()));
        }
    }
}

/// Response received from the server, whatever its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a JSON response; used by the mock transport and tests.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_owned(), "application/json".to_owned())],
            body: body.to_string().into_bytes(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Body parsed as JSON, or `None` if it is not valid JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Failure to obtain any response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request was sent but nothing came back (offline, DNS, timeout).
    #[error("no response: {0}")]
    NoResponse(String),
    /// The request could not be constructed or issued.
    #[error("{0}")]
    Build(String),
}

/// Underlying HTTP client used by [`super::http::HttpClient`].
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Issue `request` and return whatever response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Browser `fetch` transport backed by `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            fetch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Build("not available outside the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use futures::future::{Either, select};
    use gloo_net::http::{Method as GlooMethod, RequestBuilder};
    use web_sys::{AbortController, RequestCredentials};

    let method = match request.method {
        Method::Get => GlooMethod::GET,
        Method::Post => GlooMethod::POST,
        Method::Put => GlooMethod::PUT,
        Method::Patch => GlooMethod::PATCH,
        Method::Delete => GlooMethod::DELETE,
    };
    let credentials = if request.with_credentials {
        RequestCredentials::Include
    } else {
        RequestCredentials::SameOrigin
    };
    let controller = AbortController::new()
        .map_err(|_| TransportError::Build("failed to create abort controller".to_owned()))?;
    let signal = controller.signal();

    let mut builder = RequestBuilder::new(&request.url)
        .method(method)
        .credentials(credentials)
        .abort_signal(Some(&signal));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let built = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::Build(e.to_string()))?;

    let timeout_ms = request.timeout_ms.unwrap_or(crate::config::REQUEST_TIMEOUT_MS);
    let sending = std::pin::pin!(built.send());
    let timeout = gloo_timers::future::TimeoutFuture::new(timeout_ms);
    let resp = match select(sending, timeout).await {
        Either::Left((Ok(resp), _)) => resp,
        Either::Left((Err(e), _)) => return Err(TransportError::NoResponse(e.to_string())),
        Either::Right(((), _)) => {
            controller.abort();
            return Err(TransportError::NoResponse(format!("timeout of {timeout_ms}ms exceeded")));
        }
    };

    let status = resp.status();
    let headers = resp.headers().entries().collect();
    let body = resp
        .binary()
        .await
        .map_err(|e| TransportError::NoResponse(e.to_string()))?;
    Ok(HttpResponse { status, headers, body })
}

/// Transport selected at startup from [`crate::config::AppConfig::use_mock`].
#[derive(Clone, Debug)]
pub enum AppTransport {
    Live(GlooTransport),
    Mock(MockTransport),
}

impl AppTransport {
    #[must_use]
    pub fn from_flag(use_mock: bool) -> Self {
        if use_mock {
            Self::Mock(MockTransport::default())
        } else {
            Self::Live(GlooTransport)
        }
    }
}

#[async_trait(?Send)]
impl Transport for AppTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match self {
            Self::Live(live) => live.send(request).await,
            Self::Mock(mock) => mock.send(request).await,
        }
    }
}
