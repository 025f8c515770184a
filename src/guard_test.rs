use std::cell::Cell;
use std::sync::Arc;

use super::*;
use crate::net::error::ErrorKind;
use crate::net::http::ClientConfig;
use crate::net::test_support::ScriptedTransport;
use crate::net::transport::TransportError;
use crate::util::credential::MemoryCredentials;
use futures::executor::block_on;
use serde_json::json;

// Answers every validation the same way and counts calls.
struct CountingProbe {
    valid: bool,
    calls: Cell<usize>,
}

impl CountingProbe {
    fn valid() -> Self {
        Self { valid: true, calls: Cell::new(0) }
    }

    fn invalid() -> Self {
        Self { valid: false, calls: Cell::new(0) }
    }
}

#[async_trait(?Send)]
impl SessionProbe for CountingProbe {
    async fn validate(&self) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        if self.valid { Ok(()) } else { Err(ApiError::network()) }
    }
}

fn guest_routes() -> impl Iterator<Item = AppRoute> {
    AppRoute::ALL.into_iter().filter(|r| r.guest_only())
}

fn member_routes() -> impl Iterator<Item = AppRoute> {
    AppRoute::ALL.into_iter().filter(|r| !r.guest_only())
}

// =============================================================
// Guest-only destinations
// =============================================================

#[test]
fn guest_route_without_token_allows_without_network() {
    for route in guest_routes() {
        let credentials = MemoryCredentials::new();
        let probe = CountingProbe::valid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Allow);
        assert_eq!(probe.calls.get(), 0);
    }
}

#[test]
fn guest_route_with_valid_token_redirects_home() {
    for route in guest_routes() {
        let credentials = MemoryCredentials::with_token("good");
        let probe = CountingProbe::valid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Redirect(AppRoute::Home));
        assert_eq!(probe.calls.get(), 1);
        assert_eq!(credentials.get().as_deref(), Some("good"));
    }
}

#[test]
fn guest_route_with_invalid_token_clears_and_allows() {
    for route in guest_routes() {
        let credentials = MemoryCredentials::with_token("stale");
        let probe = CountingProbe::invalid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Allow);
        assert_eq!(probe.calls.get(), 1);
        assert_eq!(credentials.get(), None);
    }
}

// =============================================================
// Authenticated destinations
// =============================================================

#[test]
fn member_route_without_token_redirects_to_login_without_network() {
    for route in member_routes() {
        let credentials = MemoryCredentials::new();
        let probe = CountingProbe::valid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Redirect(AppRoute::Login));
        assert_eq!(probe.calls.get(), 0);
    }
}

#[test]
fn member_route_with_valid_token_allows() {
    for route in member_routes() {
        let credentials = MemoryCredentials::with_token("good");
        let probe = CountingProbe::valid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Allow);
        assert_eq!(probe.calls.get(), 1);
        assert_eq!(credentials.get().as_deref(), Some("good"));
    }
}

#[test]
fn member_route_with_invalid_token_clears_and_redirects_to_login() {
    for route in member_routes() {
        let credentials = MemoryCredentials::with_token("stale");
        let probe = CountingProbe::invalid();
        assert_eq!(block_on(decide(route, &credentials, &probe)), Decision::Redirect(AppRoute::Login));
        assert_eq!(probe.calls.get(), 1);
        assert_eq!(credentials.get(), None);
    }
}

// =============================================================
// Guard driving the real client
// =============================================================

#[test]
fn client_probe_sends_signed_profile_request() {
    let credentials = Arc::new(MemoryCredentials::with_token("abc"));
    let transport = ScriptedTransport::new().reply_json(200, &json!({ "code": 0, "data": { "id": 1 }, "message": "ok" }));
    let client = HttpClient::standard(ClientConfig::default(), transport.clone(), credentials.clone());

    assert_eq!(block_on(decide(AppRoute::Home, credentials.as_ref(), &client)), Decision::Allow);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/api/user/profile");
    assert_eq!(sent[0].header("Authorization"), Some("Bearer abc"));
}

#[test]
fn expired_token_logs_out_through_client() {
    let credentials = Arc::new(MemoryCredentials::with_token("expired"));
    let transport =
        ScriptedTransport::new().reply_json(401, &json!({ "code": 401, "message": "invalid or expired token", "data": null }));
    let client = HttpClient::standard(ClientConfig::default(), transport, credentials.clone());

    assert_eq!(
        block_on(decide(AppRoute::Home, credentials.as_ref(), &client)),
        Decision::Redirect(AppRoute::Login)
    );
    assert_eq!(credentials.get(), None);
}

#[test]
fn business_failure_on_profile_counts_as_invalid() {
    let credentials = Arc::new(MemoryCredentials::with_token("t"));
    let transport = ScriptedTransport::new().reply_json(200, &json!({ "code": 1, "data": null, "message": "disabled" }));
    let client = HttpClient::standard(ClientConfig::default(), transport, credentials.clone());

    let err = block_on(client.validate()).expect_err("business failure");
    assert_eq!(err.kind, ErrorKind::Business);

    let transport = ScriptedTransport::new().reply_json(200, &json!({ "code": 1, "data": null, "message": "disabled" }));
    let client = HttpClient::standard(ClientConfig::default(), transport, credentials.clone());
    assert_eq!(block_on(decide(AppRoute::Login, credentials.as_ref(), &client)), Decision::Allow);
    assert_eq!(credentials.get(), None);
}

#[test]
fn network_outage_is_treated_like_invalid_token() {
    let credentials = Arc::new(MemoryCredentials::with_token("fine"));
    let transport = ScriptedTransport::new().reply(Err(TransportError::NoResponse("offline".to_owned())));
    let client = HttpClient::standard(ClientConfig::default(), transport.clone(), credentials.clone());

    assert_eq!(
        block_on(decide(AppRoute::Home, credentials.as_ref(), &client)),
        Decision::Redirect(AppRoute::Login)
    );
    assert_eq!(credentials.get(), None);
    assert_eq!(transport.sent_count(), 1);
}
