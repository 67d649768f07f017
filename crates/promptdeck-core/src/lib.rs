//! Validation, sanitization, and batch orchestration for promptdeck.
//!
//! This crate owns the request validator and the sequential batch loop
//! that drives completion, persistence, and event emission per item.

pub mod error;
pub mod orchestrator;
pub mod sanitize;
pub mod validate;

pub use error::ValidationError;
pub use orchestrator::{BatchOrchestrator, RunReport};
/// Emission seam shared with the server.
pub use promptdeck_protocol::{OutcomeSink, SinkClosed};
pub use sanitize::sanitize;
pub use validate::validate_batch;
