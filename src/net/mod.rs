//! Networking modules for the shared API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the seam to the underlying HTTP stack, `pipeline` holds the
//! request/response stages, `http` composes them into [`http::HttpClient`],
//! and `api` exposes the typed user endpoints built on top of it.

pub mod api;
pub mod error;
pub mod http;
pub mod mock;
pub mod pipeline;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
