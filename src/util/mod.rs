//! Browser utility helpers shared by the guard, the HTTP client and pages.

pub mod credential;
