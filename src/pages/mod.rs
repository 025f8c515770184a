//! Route pages.
//!
//! Input limits follow the backend's user schema so obviously invalid forms
//! are rejected before a request is made.

pub mod home;
pub mod login;
pub mod register;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 100;

fn password_in_range(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.chars().count())
}
