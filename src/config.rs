//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bundle is static, so configuration is baked in at compile time from
//! `APP_USE_MOCK` and `APP_BASE_API`. Parsing lives in [`AppConfig::from_values`]
//! so the defaults can be tested without touching the build environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base path used when `APP_BASE_API` is unset or empty.
pub const DEFAULT_BASE_API: &str = "/api";

/// Per-request timeout applied by the shared HTTP client.
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Application-wide settings resolved from the build environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Serve API calls from the in-bundle mock transport instead of the network.
    pub use_mock: bool,
    /// Prefix joined in front of every relative API path.
    pub base_api: String,
}

impl AppConfig {
    /// Read configuration captured by `option_env!` when the crate was built.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(option_env!("APP_USE_MOCK"), option_env!("APP_BASE_API"))
    }

    /// Build a config from raw environment strings.
    ///
    /// Mock mode stays on unless the flag is exactly `"false"`.
    #[must_use]
    pub fn from_values(use_mock: Option<&str>, base_api: Option<&str>) -> Self {
        let use_mock = use_mock.map_or(true, |raw| raw != "false");
        let base_api = base_api
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_BASE_API)
            .to_owned();
        Self { use_mock, base_api }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
