//! Per-item stream events and the emission seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Event name carried by successful completion frames.
pub const RESPONSE_EVENT: &str = "gptResponse";
/// Event name carried by per-item failure frames.
pub const ERROR_EVENT: &str = "gptError";

/// Payload of a successful completion event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    /// The sanitized user instruction that produced the completion.
    pub user_instruction: String,
    /// The completion text returned by the endpoint.
    pub assistant_response: String,
}

/// Payload of a per-item failure event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailurePayload {
    /// The sanitized user instruction of the failed item.
    pub user_instruction: String,
    /// Why the item produced no completion.
    pub error: String,
}

/// One outcome event produced for a single batch item.
///
/// A batch of N items produces exactly N of these, in submission order,
/// mixing responses and failures freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    /// The item completed and carries text.
    Response(ResponsePayload),
    /// The item failed and carries a reason.
    Failure(FailurePayload),
}

impl ItemEvent {
    /// Build a response event tagged with its originating user instruction.
    pub fn response(
        user_instruction: impl Into<String>,
        assistant_response: impl Into<String>,
    ) -> Self {
        Self::Response(ResponsePayload {
            user_instruction: user_instruction.into(),
            assistant_response: assistant_response.into(),
        })
    }

    /// Build a failure event tagged with its originating user instruction.
    pub fn failure(user_instruction: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure(FailurePayload {
            user_instruction: user_instruction.into(),
            error: error.into(),
        })
    }

    /// Stream event name for this outcome.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Response(_) => RESPONSE_EVENT,
            Self::Failure(_) => ERROR_EVENT,
        }
    }

    /// User instruction the event is tagged with.
    pub fn user_instruction(&self) -> &str {
        match self {
            Self::Response(payload) => &payload.user_instruction,
            Self::Failure(payload) => &payload.user_instruction,
        }
    }

    /// JSON-encode the event payload for the stream's data line.
    pub fn data(&self) -> serde_json::Result<String> {
        match self {
            Self::Response(payload) => serde_json::to_string(payload),
            Self::Failure(payload) => serde_json::to_string(payload),
        }
    }
}

/// The outbound event stream's peer is gone.
#[derive(Debug, thiserror::Error)]
#[error("event stream closed by peer")]
pub struct SinkClosed;

/// Receives one event per processed batch item.
///
/// Implementations must deliver (or enqueue for delivery and flushing)
/// synchronously with the call, so the peer observes progressive results
/// while later items are still being processed.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    /// Deliver one item event. `SinkClosed` means the peer has gone away
    /// and the caller may stop producing events.
    async fn emit(&self, event: ItemEvent) -> Result<(), SinkClosed>;
}

#[cfg(test)]
mod tests {
    use super::ItemEvent;
    use pretty_assertions::assert_eq;

    #[test]
    fn response_event_serializes_camel_case() {
        let event = ItemEvent::response("a poem about rust", "Ode to the borrow checker");
        assert_eq!(event.name(), "gptResponse");
        assert_eq!(event.user_instruction(), "a poem about rust");
        assert_eq!(
            event.data().expect("encode"),
            r#"{"userInstruction":"a poem about rust","assistantResponse":"Ode to the borrow checker"}"#
        );
    }

    #[test]
    fn failure_event_serializes_camel_case() {
        let event = ItemEvent::failure("a poem", "no content returned");
        assert_eq!(event.name(), "gptError");
        assert_eq!(
            event.data().expect("encode"),
            r#"{"userInstruction":"a poem","error":"no content returned"}"#
        );
    }

    #[test]
    fn data_line_never_spans_multiple_lines() {
        let event = ItemEvent::response("first\nsecond", "a\nb");
        let data = event.data().expect("encode");
        assert!(!data.contains('\n'));
    }
}
