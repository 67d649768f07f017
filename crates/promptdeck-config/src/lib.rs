//! Configuration models and file loading for the promptdeck gateway.
//!
//! This crate owns the gateway config schema and its validation, used by
//! both the server and the binary.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Config file loading.
pub use loader::load_config;
/// Configuration schema models.
pub use model::*;
