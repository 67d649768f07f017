//! HTTP client for the external chat-completion endpoint.

use crate::error::CompletionError;
use async_trait::async_trait;
use log::debug;
use promptdeck_protocol::{GenerationParams, InstructionItem};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Default per-call timeout in seconds, sized to outlast long generations
/// while still bounding a stalled call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 171;

/// Client abstraction invoked once per batch item.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Request one completion for an instruction triple.
    async fn complete(
        &self,
        item: &InstructionItem,
        params: &GenerationParams,
    ) -> Result<String, CompletionError>;
}

/// Completion client backed by a pooled `reqwest` client.
///
/// Holds no per-call state; every invocation builds its own request, so
/// items remain independent and individually testable.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpCompletionClient {
    /// Create a client for an endpoint with a bearer key.
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Completer for HttpCompletionClient {
    async fn complete(
        &self,
        item: &InstructionItem,
        params: &GenerationParams,
    ) -> Result<String, CompletionError> {
        let payload = build_payload(item, params);
        debug!(
            "requesting completion (model={}, user_len={})",
            params.model,
            item.user.len()
        );
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| CompletionError::Transport(err.to_string()))?;
        parse_completion(&body)
    }
}

/// Build the fixed three-message chat payload for one item.
///
/// Message order is system, assistant, user; the shared sampling parameters
/// ride alongside.
pub fn build_payload(item: &InstructionItem, params: &GenerationParams) -> Value {
    json!({
        "model": params.model,
        "messages": [
            { "role": "system", "content": item.system },
            { "role": "assistant", "content": item.assistant },
            { "role": "user", "content": item.user },
        ],
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
        "top_p": params.top_p,
        "frequency_penalty": params.frequency_penalty,
        "presence_penalty": params.presence_penalty,
    })
}

/// Extract the completion text from a chat response body.
///
/// Invalid JSON is a decode failure; valid JSON missing
/// `choices[0].message.content` is the fixed no-content failure.
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let decoded: ChatResponse =
        serde_json::from_str(body).map_err(|err| CompletionError::Decode(err.to_string()))?;
    decoded
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(CompletionError::NoContent)
}

/// Response shape returned by the chat-completion endpoint.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
