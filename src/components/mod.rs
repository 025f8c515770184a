//! Reusable UI components.

pub mod guarded;
