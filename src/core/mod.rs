//! Core module for the study-progress engine

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;

/// Returns the current version of the `studytrack` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
