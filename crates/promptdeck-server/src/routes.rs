//! HTTP routes for the gateway.

use crate::error::ServerError;
use crate::sse::ChannelSink;
use crate::state::AppState;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use log::{info, warn};
use promptdeck_core::{BatchOrchestrator, validate_batch};
use promptdeck_protocol::ErrorBody;
use promptdeck_store::ResponseStore;
use serde::Deserialize;
use serde_json::Value;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/completions", post(stream_batch))
        .route("/api/responses", get(recent_responses))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Validate a batch request and stream one event per item.
///
/// Validation failures return a non-streamed 400 before any external call;
/// everything after validation is delivered as stream events.
async fn stream_batch(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();

    let decoded: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            warn!("rejecting unparsable request body (request_id={request_id}): {err}");
            return invalid_request(vec![format!("[body] {err}")]);
        }
    };
    let batch = match validate_batch(&decoded) {
        Ok(batch) => batch,
        Err(err) => {
            warn!(
                "rejecting invalid batch (request_id={request_id}, violations={})",
                err.violations.len()
            );
            return invalid_request(err.details());
        }
    };

    info!(
        "accepted batch (request_id={request_id}, items={})",
        batch.len()
    );
    let (sink, events) = ChannelSink::channel();
    let orchestrator = BatchOrchestrator::new(state.completer.clone(), state.store.clone());
    tokio::spawn(async move {
        orchestrator.run(request_id, &batch, &sink).await;
    });
    Sse::new(UnboundedReceiverStream::new(events)).into_response()
}

/// Map validation details to the non-streamed 400 body.
fn invalid_request(details: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::invalid_request(details)),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    20
}

/// Most recent persisted request/response rows, newest first.
async fn recent_responses(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Response, ServerError> {
    let records = state.store.recent(query.limit).await?;
    Ok(Json(records).into_response())
}
