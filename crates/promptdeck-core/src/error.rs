//! Error types for batch validation.

use promptdeck_protocol::Violation;
use thiserror::Error;

/// A batch request failed schema validation.
///
/// Carries every violated property, not just the first, so the caller can
/// report all problems in one round trip. Fatal to the whole request;
/// nothing downstream of validation runs.
#[derive(Debug, Error)]
#[error("invalid batch request ({} violations)", .violations.len())]
pub struct ValidationError {
    /// All violated properties and messages.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Render violations as `[path] message` detail strings.
    pub fn details(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}
