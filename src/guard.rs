//! Navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before a route renders. A stored token is never trusted on its own:
//! when one is present the guard makes exactly one profile call to validate
//! it, and clears it if that call fails.
//!
//! The failure cause is not distinguished, so a network outage logs the user
//! out just like an expired token. The cause is logged so the two can be told
//! apart in the console.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use async_trait::async_trait;

use crate::net::api::PROFILE_PATH;
use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::transport::Transport;
use crate::routes::AppRoute;
use crate::util::credential::CredentialStore;

/// Outcome of guarding one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Render the requested destination.
    Allow,
    /// Abandon the requested destination and go here instead.
    Redirect(AppRoute),
}

/// Validates the stored session against the backend.
#[async_trait(?Send)]
pub trait SessionProbe {
    /// # Errors
    ///
    /// Returns the normalized error when the session is not valid or the
    /// check could not complete.
    async fn validate(&self) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl<T: Transport> SessionProbe for HttpClient<T> {
    async fn validate(&self) -> Result<(), ApiError> {
        self.get(PROFILE_PATH).await.map(|_| ())
    }
}

/// Decide whether navigation to `destination` may proceed.
pub async fn decide<S, P>(destination: AppRoute, credentials: &S, probe: &P) -> Decision
where
    S: CredentialStore + ?Sized,
    P: SessionProbe + ?Sized,
{
    let guest_only = destination.guest_only();
    let decision = if credentials.get().is_none() {
        if guest_only { Decision::Allow } else { Decision::Redirect(AppRoute::Login) }
    } else {
        match probe.validate().await {
            Ok(()) if guest_only => Decision::Redirect(AppRoute::Home),
            Ok(()) => Decision::Allow,
            Err(err) => {
                log::warn!("session check failed ({:?}): {err}; clearing token", err.kind);
                credentials.clear();
                if guest_only { Decision::Allow } else { Decision::Redirect(AppRoute::Login) }
            }
        }
    };
    log::debug!("guard {} -> {decision:?}", destination.path());
    decision
}
