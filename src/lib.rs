//! # taskpilot-web
//!
//! Leptos + WASM frontend shell for the Taskpilot application.
//!
//! This crate owns the route table, the navigation guard that keeps guest-only
//! and authenticated views apart, and the shared HTTP client every page uses
//! to talk to the API. Browser glue is gated behind the `csr` feature; the
//! decision logic and the request/response pipeline build and test natively.

pub mod app;
pub mod components;
pub mod config;
pub mod guard;
pub mod net;
pub mod pages;
pub mod routes;
pub mod util;

/// Browser entry point: install logging and mount the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
