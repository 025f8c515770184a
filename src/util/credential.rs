//! Session credential storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login flow writes the token, the request pipeline reads it to sign
//! outgoing calls, and the navigation guard clears it when validation fails.
//! All three go through [`CredentialStore`] so tests can swap the browser
//! `localStorage` for an in-memory cell.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::sync::Mutex;

/// `localStorage` key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Get/set/clear access to the persisted session token.
pub trait CredentialStore: Send + Sync {
    /// Current token, if one is stored.
    fn get(&self) -> Option<String>;
    /// Persist `token`, replacing any previous value.
    fn set(&self, token: &str);
    /// Remove the stored token.
    fn clear(&self);
}

/// Token persisted in the browser's `localStorage` under [`TOKEN_KEY`].
///
/// Outside the browser every read is empty and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageCredentials;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for LocalStorageCredentials {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn set(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// Process-local token cell, used natively and by tests.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `token` already stored.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self) -> Option<String> {
        self.token.lock().map_or(None, |slot| slot.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}
