//! Scripted completion client for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use promptdeck_client::{Completer, CompletionError};
use promptdeck_protocol::{GenerationParams, InstructionItem};
use std::collections::VecDeque;

/// Completer returning a scripted sequence of outcomes and recording every
/// item it was invoked with.
#[derive(Default)]
pub struct ScriptedCompleter {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<InstructionItem>>,
}

impl ScriptedCompleter {
    /// Create a completer that plays back the given outcomes in order.
    pub fn new(script: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Items the completer was invoked with, in order.
    pub fn calls(&self) -> Vec<InstructionItem> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(
        &self,
        item: &InstructionItem,
        _params: &GenerationParams,
    ) -> Result<String, CompletionError> {
        self.calls.lock().push(item.clone());
        self.script
            .lock()
            .pop_front()
            .unwrap_or(Err(CompletionError::NoContent))
    }
}
