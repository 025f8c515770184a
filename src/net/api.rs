//! Typed helpers for the user endpoints.
//!
//! These sit on top of [`HttpClient`], so envelopes are already unwrapped and
//! failures already normalized by the time they decode.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::Transport;
use super::types::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use crate::util::credential::CredentialStore;

/// Current-user endpoint; doubles as the token validation probe.
pub const PROFILE_PATH: &str = "/user/profile";
pub const LOGIN_PATH: &str = "/user/login";
pub const REGISTER_PATH: &str = "/user/register";

/// Fetch the profile of the user owning the stored token.
///
/// # Errors
///
/// Returns the normalized error when the token is missing, invalid, or the
/// call fails.
pub async fn fetch_profile<T: Transport>(client: &HttpClient<T>) -> Result<UserProfile, ApiError> {
    client.get_json(PROFILE_PATH).await
}

/// Log in and persist the returned access token.
///
/// # Errors
///
/// Returns the normalized error on rejected credentials or transport failure;
/// the stored token is left untouched in that case.
pub async fn login<T: Transport, S: CredentialStore + ?Sized>(
    client: &HttpClient<T>,
    credentials: &S,
    form: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let reply: LoginResponse = client.post_json(LOGIN_PATH, form).await?;
    credentials.set(&reply.access_token);
    log::info!("signed in as {}", form.username);
    Ok(reply)
}

/// Create an account. Does not sign in.
///
/// # Errors
///
/// Returns the normalized error when the backend rejects the registration.
pub async fn register<T: Transport>(client: &HttpClient<T>, form: &RegisterRequest) -> Result<UserProfile, ApiError> {
    client.post_json(REGISTER_PATH, form).await
}

/// Drop the stored token. The backend keeps no session to revoke.
pub fn logout<S: CredentialStore + ?Sized>(credentials: &S) {
    credentials.clear();
    log::info!("signed out");
}
