//! The shared API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`HttpClient`] is built at startup and handed to the guard and pages
//! through context. It holds fixed configuration, a transport, and the stage
//! pipeline; there is no per-call state, so concurrent calls are independent
//! and nothing is cached between them.
//!
//! ERROR HANDLING
//! ==============
//! Every failure path settles as an [`ApiError`]; nothing is swallowed and
//! nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::pipeline::{BearerAuth, Payload, Rejection, RequestStage, ResponseStage, UnwrapEnvelope};
use super::transport::{HttpRequest, Transport};
use crate::config::{AppConfig, DEFAULT_BASE_API, REQUEST_TIMEOUT_MS};
use crate::util::credential::CredentialStore;

/// Settings fixed when the client is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u32,
    /// Send cookies on cross-origin requests.
    pub with_credentials: bool,
    /// Applied to every request unless the request sets the header itself.
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: REQUEST_TIMEOUT_MS,
            with_credentials: false,
            default_headers: vec![
                ("Accept".to_owned(), "application/json".to_owned()),
                ("Content-Type".to_owned(), "application/json".to_owned()),
            ],
        }
    }

    #[must_use]
    pub fn from_app(config: &AppConfig) -> Self {
        Self::new(config.base_api.clone())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_API)
    }
}

/// Join `base` and `path` with exactly one slash; absolute URLs bypass the base.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_owned();
    }
    format!("{}/{path}", base.trim_end_matches('/'))
}

/// Configured request issuer wrapping a [`Transport`] with stage pipelines.
#[derive(Clone)]
pub struct HttpClient<T> {
    config: ClientConfig,
    transport: T,
    request_stages: Vec<Arc<dyn RequestStage>>,
    response_stages: Vec<Arc<dyn ResponseStage>>,
}

impl<T: Transport> HttpClient<T> {
    /// Client with no stages: responses come back as [`Payload::Raw`].
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            request_stages: Vec::new(),
            response_stages: Vec::new(),
        }
    }

    /// Client with bearer signing and envelope unwrapping installed.
    #[must_use]
    pub fn standard(config: ClientConfig, transport: T, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::new(config, transport)
            .with_request_stage(BearerAuth::new(credentials))
            .with_response_stage(UnwrapEnvelope)
    }

    #[must_use]
    pub fn with_request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    #[must_use]
    pub fn with_response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response_stages.push(Arc::new(stage));
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Apply defaults and request stages, producing what the transport will see.
    #[must_use]
    pub fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        request.url = join_url(&self.config.base_url, &request.url);
        for (name, value) in &self.config.default_headers {
            if request.header(name).is_none() {
                request.set_header(name, value);
            }
        }
        request.timeout_ms.get_or_insert(self.config.timeout_ms);
        request.with_credentials |= self.config.with_credentials;
        for stage in &self.request_stages {
            stage.on_request(&mut request);
        }
        request
    }

    /// Issue `request` through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for business, HTTP, network, and construction failures.
    pub async fn request(&self, request: HttpRequest) -> Result<Payload, ApiError> {
        let request = self.prepare(request);
        log::debug!("{} {}", request.method.as_str(), request.url);

        let mut settled = match self.transport.send(request.clone()).await {
            Ok(resp) if resp.is_success() => Ok(Payload::Raw(resp)),
            Ok(resp) => Err(Rejection::Status(resp)),
            Err(err) => Err(Rejection::Transport(err)),
        };
        for stage in &self.response_stages {
            settled = match settled {
                Ok(payload) => stage.on_fulfilled(&request, payload),
                Err(rejection) => Err(stage.on_rejected(&request, rejection)),
            };
        }

        settled.map_err(|rejection| {
            let err = ApiError::from(rejection);
            log::debug!("{} {} failed: {err}", request.method.as_str(), request.url);
            err
        })
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(&self, path: &str) -> Result<Payload, ApiError> {
        self.request(HttpRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Payload, ApiError> {
        self.request(HttpRequest::delete(path)).await
    }

    /// # Errors
    ///
    /// Fails with kind `Request` if `body` cannot be serialized, otherwise
    /// see [`HttpClient::request`].
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Payload, ApiError> {
        self.request(HttpRequest::post(path).with_json_body(body)?).await
    }

    /// # Errors
    ///
    /// Fails with kind `Request` if `body` cannot be serialized, otherwise
    /// see [`HttpClient::request`].
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Payload, ApiError> {
        self.request(HttpRequest::put(path).with_json_body(body)?).await
    }

    /// GET `path` and decode the unwrapped data as `R`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`]; decode failures are kind `Request`.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.get(path).await?.into_json()
    }

    /// POST `body` to `path` and decode the unwrapped data as `R`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::post`]; decode failures are kind `Request`.
    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.post(path, body).await?.into_json()
    }
}
