//! Shared handler state.

use promptdeck_client::Completer;
use promptdeck_store::ResponseStore;
use std::sync::Arc;

/// State shared by all request handlers.
///
/// The completer and store are constructed once at startup and passed
/// explicitly; handlers own no hidden cross-request state.
#[derive(Clone)]
pub struct AppState {
    /// Client invoked once per batch item.
    pub completer: Arc<dyn Completer>,
    /// Append-only response log.
    pub store: Arc<dyn ResponseStore>,
}

impl AppState {
    /// Assemble handler state from its collaborators.
    pub fn new(completer: Arc<dyn Completer>, store: Arc<dyn ResponseStore>) -> Self {
        Self { completer, store }
    }
}
