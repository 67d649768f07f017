//! Wire protocol and data-model types for the promptdeck gateway.

mod event;

pub use event::{ERROR_EVENT, ItemEvent, OutcomeSink, RESPONSE_EVENT, SinkClosed};
pub use event::{FailurePayload, ResponsePayload};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One (system, assistant, user) instruction triple submitted by the caller.
///
/// Constructed from sanitized input and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstructionItem {
    /// System role instruction.
    pub system: String,
    /// Assistant role instruction.
    pub assistant: String,
    /// User role instruction.
    pub user: String,
}

impl InstructionItem {
    /// Name of the first empty instruction field, if any.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        if self.system.is_empty() {
            return Some("system");
        }
        if self.assistant.is_empty() {
            return Some("assistant");
        }
        if self.user.is_empty() {
            return Some("user");
        }
        None
    }
}

/// Generation parameters shared by every item in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationParams {
    /// Model identifier passed to the completion endpoint.
    pub model: String,
    /// Sampling temperature, 0 to 2.
    pub temperature: f64,
    /// Maximum tokens to generate, greater than zero.
    pub max_tokens: u32,
    /// Nucleus sampling cutoff, 0 to 1.
    pub top_p: f64,
    /// Frequency penalty.
    pub frequency_penalty: f64,
    /// Presence penalty.
    pub presence_penalty: f64,
}

/// A validated batch of instruction triples plus shared parameters.
///
/// Only the validator builds one, so the parallel-array invariant of the
/// inbound request (equal lengths, index `i` forming one item) holds by
/// construction. Discarded once its run completes.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    items: Vec<InstructionItem>,
    params: GenerationParams,
}

impl BatchRequest {
    /// Assemble a batch from already-sanitized parts.
    pub fn new(items: Vec<InstructionItem>, params: GenerationParams) -> Self {
        Self { items, params }
    }

    /// Items in submission order.
    pub fn items(&self) -> &[InstructionItem] {
        &self.items
    }

    /// Shared generation parameters.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the batch has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One structured validation complaint about an inbound request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    /// Property path the complaint refers to.
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl Violation {
    /// Build a violation for a property path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path, self.message)
    }
}

/// Non-streamed JSON error body returned for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Top-level error description.
    pub error: String,
    /// Per-property detail strings, empty for fatal errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorBody {
    /// Body for a request that failed schema validation.
    pub fn invalid_request(details: Vec<String>) -> Self {
        Self {
            error: "Invalid request. Input data validation failed.".to_string(),
            details,
        }
    }

    /// Body for a fatal error that prevented any streaming.
    pub fn fatal(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}
