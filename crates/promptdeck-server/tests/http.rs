//! End-to-end router tests with scripted collaborators.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use promptdeck_client::CompletionError;
use promptdeck_server::{AppState, router};
use promptdeck_store::{ResponseStore, SqliteResponseStore};
use promptdeck_test_utils::{FailingStore, RecordingStore, ScriptedCompleter};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn valid_body(users: Vec<&str>) -> Value {
    let count = users.len();
    json!({
        "user_instructions": users,
        "assistant_instructions": vec!["Write a poem based on the following user input: "; count],
        "system_instructions": vec!["You write amazing poems."; count],
        "model": "gpt-3.5-turbo",
        "temperature": 0.06,
        "max_tokens": 2999,
        "top_p": 1,
        "frequency_penalty": 0,
        "presence_penalty": 0
    })
}

fn post_completions(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/completions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let state = AppState::new(
        Arc::new(ScriptedCompleter::default()),
        Arc::new(RecordingStore::default()),
    );
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn streams_one_event_per_item() {
    let completer = Arc::new(ScriptedCompleter::new(vec![
        Ok("first poem".to_string()),
        Ok("second poem".to_string()),
    ]));
    let temp = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(
        SqliteResponseStore::open(temp.path().join("responses.db")).expect("store"),
    );
    let state = AppState::new(completer, store.clone());

    let response = router(state)
        .oneshot(post_completions(&valid_body(vec!["one", "two"])))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type"),
        "text/event-stream"
    );

    let body = body_text(response).await;
    assert_eq!(body.matches("event: gptResponse").count(), 2);
    let first = body.find("first poem").expect("first event");
    let second = body.find("second poem").expect("second event");
    assert!(first < second);
    assert!(body.contains(r#"data: {"userInstruction":"one","assistantResponse":"first poem"}"#));

    // both successes were persisted
    assert_eq!(store.len().await.expect("len"), 2);
}

#[tokio::test]
async fn interleaves_error_events_and_keeps_streaming() {
    let completer = Arc::new(ScriptedCompleter::new(vec![
        Ok("first poem".to_string()),
        Err(CompletionError::Api { status: 502 }),
        Ok("third poem".to_string()),
    ]));
    let state = AppState::new(completer, Arc::new(RecordingStore::default()));

    let response = router(state)
        .oneshot(post_completions(&valid_body(vec!["one", "two", "three"])))
        .await
        .expect("response");
    let body = body_text(response).await;

    assert_eq!(body.matches("event: gptResponse").count(), 2);
    assert_eq!(body.matches("event: gptError").count(), 1);
    assert!(body.contains("completion endpoint returned HTTP 502"));
    let error = body.find("event: gptError").expect("error event");
    let third = body.find("third poem").expect("third event");
    assert!(error < third);
}

#[tokio::test]
async fn rejects_unequal_lengths_before_any_external_call() {
    let completer = Arc::new(ScriptedCompleter::default());
    let state = AppState::new(completer.clone(), Arc::new(RecordingStore::default()));

    let mut body = valid_body(vec!["one"]);
    body["user_instructions"] = json!(["one", "two"]);
    let response = router(state)
        .oneshot(post_completions(&body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let decoded: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(decoded["error"], "Invalid request. Input data validation failed.");
    assert!(
        decoded["details"][0]
            .as_str()
            .expect("detail")
            .contains("equal length")
    );
    assert!(completer.calls().is_empty());
}

#[tokio::test]
async fn rejects_unparsable_json_with_the_same_shape() {
    let state = AppState::new(
        Arc::new(ScriptedCompleter::default()),
        Arc::new(RecordingStore::default()),
    );
    let response = router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/completions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let decoded: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(decoded["error"], "Invalid request. Input data validation failed.");
    assert!(decoded["details"][0].as_str().expect("detail").starts_with("[body]"));
}

#[tokio::test]
async fn enumerates_every_violation_in_the_400_details() {
    let state = AppState::new(
        Arc::new(ScriptedCompleter::default()),
        Arc::new(RecordingStore::default()),
    );
    let mut body = valid_body(vec!["one"]);
    body.as_object_mut().expect("object").remove("model");
    body["temperature"] = json!("warm");
    let response = router(state)
        .oneshot(post_completions(&body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let decoded: Value = serde_json::from_str(&body_text(response).await).expect("json");
    let details: Vec<&str> = decoded["details"]
        .as_array()
        .expect("details")
        .iter()
        .map(|detail| detail.as_str().expect("string"))
        .collect();
    assert_eq!(details.len(), 2);
    assert!(details.contains(&"[model] missing required field"));
    assert!(details.contains(&"[temperature] expected a number"));
}

#[tokio::test]
async fn recent_responses_reports_store_failure_as_fatal_json() {
    let state = AppState::new(Arc::new(ScriptedCompleter::default()), Arc::new(FailingStore));
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/api/responses")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let decoded: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert!(
        decoded["error"]
            .as_str()
            .expect("error")
            .starts_with("An error occurred:")
    );
    assert!(decoded.get("details").is_none());
}

#[tokio::test]
async fn recent_responses_returns_persisted_rows() {
    let store = Arc::new(RecordingStore::default());
    store
        .append("a poem about rust", r#"{"response":"Ode"}"#)
        .await
        .expect("append");
    let state = AppState::new(Arc::new(ScriptedCompleter::default()), store);

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/api/responses?limit=5")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let decoded: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(decoded[0]["input_data"], "a poem about rust");
}
