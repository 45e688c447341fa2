//! Shared library for `EnrollCheck`
//! Contains the course-registration validation engine used by the CLI.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `EnrollCheck` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
