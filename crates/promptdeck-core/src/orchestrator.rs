//! Sequential batch orchestration.

use log::{debug, info, warn};
use promptdeck_client::Completer;
use promptdeck_protocol::{BatchRequest, ItemEvent, OutcomeSink};
use promptdeck_store::ResponseStore;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Summary of a completed batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Items that produced a response event.
    pub responses: usize,
    /// Items that produced a failure event.
    pub failures: usize,
    /// Whether the peer disconnected before the batch finished.
    pub disconnected: bool,
}

/// Drives one validated batch through completion, persistence, and emission.
///
/// Items are processed strictly in submission order; results must reach the
/// peer in that order, so there is no fan-out. One item's outcome has no
/// influence on the next.
pub struct BatchOrchestrator {
    completer: Arc<dyn Completer>,
    store: Arc<dyn ResponseStore>,
}

impl BatchOrchestrator {
    /// Build an orchestrator over a completer and a response store.
    pub fn new(completer: Arc<dyn Completer>, store: Arc<dyn ResponseStore>) -> Self {
        Self { completer, store }
    }

    /// Process every item in order, emitting exactly one event per item.
    ///
    /// A failed item is reported as a failure event and the loop continues;
    /// a failed store write is logged and never blocks delivery of the
    /// computed result. A closed sink stops the remaining loop.
    pub async fn run(
        &self,
        request_id: Uuid,
        batch: &BatchRequest,
        sink: &dyn OutcomeSink,
    ) -> RunReport {
        let mut report = RunReport::default();
        info!(
            "starting batch (request_id={request_id}, items={})",
            batch.len()
        );

        for (index, item) in batch.items().iter().enumerate() {
            let event = if let Some(field) = item.first_empty_field() {
                warn!(
                    "skipping item with empty instruction (request_id={request_id}, index={index}, field={field})"
                );
                ItemEvent::failure(&item.user, format!("{field} instruction is empty"))
            } else {
                match self.completer.complete(item, batch.params()).await {
                    Ok(text) => {
                        let response_json = json!({ "response": text }).to_string();
                        if let Err(err) = self.store.append(&item.user, &response_json).await {
                            warn!(
                                "failed to persist response (request_id={request_id}, index={index}): {err}"
                            );
                        }
                        ItemEvent::response(&item.user, text)
                    }
                    Err(err) => {
                        warn!(
                            "completion failed (request_id={request_id}, index={index}): {err}"
                        );
                        ItemEvent::failure(&item.user, err.to_string())
                    }
                }
            };

            match &event {
                ItemEvent::Response(_) => report.responses += 1,
                ItemEvent::Failure(_) => report.failures += 1,
            }
            if sink.emit(event).await.is_err() {
                report.disconnected = true;
                info!(
                    "peer disconnected, stopping batch (request_id={request_id}, index={index})"
                );
                break;
            }
            debug!("emitted item event (request_id={request_id}, index={index})");
        }

        info!(
            "batch finished (request_id={request_id}, responses={}, failures={}, disconnected={})",
            report.responses, report.failures, report.disconnected
        );
        report
    }
}
