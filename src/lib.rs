//! Shared library for `studytrack`
//! Contains the domain model, persistence, analysis, and configuration
//! used by the CLI binary.

pub mod core;
pub mod logger;

pub use self::core::config;
pub use self::core::get_version;
