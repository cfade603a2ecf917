use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    Router,
};
use parley::{ActivityHandler, KeywordReplyGenerator, StoreError};
use parley_api::{config::Config, error::ApiError, router::build_router, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::default();
    let handler = ActivityHandler::builder()
        .reply_generator(Arc::new(KeywordReplyGenerator::new()))
        .config(config.bot.clone())
        .build()
        .unwrap();

    build_router(Arc::new(AppState::new(config, handler)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn post_activity(app: &Router, activity: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/messages", Some(activity)).await
}

async fn poll(app: &Router, conversation_id: &str, watermark: Option<u64>) -> (StatusCode, Value) {
    let uri = match watermark {
        Some(w) => format!("/api/conversations/{}/activities?watermark={}", conversation_id, w),
        None => format!("/api/conversations/{}/activities", conversation_id),
    };
    send(app, Method::GET, &uri, None).await
}

#[tokio::test]
async fn test_greeting_is_delivered_by_poll() {
    let app = app();

    let (status, ack) = post_activity(
        &app,
        json!({
            "type": "conversationUpdate",
            "id": "in-1",
            "from": { "id": "user-1", "name": "Ada" },
            "conversation": { "id": "conv-1" },
            "membersAdded": [{ "id": "user-1" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ack_id = ack["id"].as_str().unwrap().to_string();

    let (status, set) = poll(&app, "conv-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(set["watermark"], 1);
    assert_eq!(set["activities"].as_array().unwrap().len(), 1);

    let reply = &set["activities"][0];
    assert_eq!(reply["id"], ack_id.as_str());
    assert_eq!(reply["type"], "message");
    assert_eq!(reply["replyToId"], "in-1");
    assert_eq!(reply["from"]["id"], "bot");
    assert_eq!(reply["recipient"]["id"], "user-1");
    assert_eq!(reply["conversation"]["id"], "conv-1");
    assert!(reply["text"].as_str().unwrap().contains("Bonjour"));
}

#[tokio::test]
async fn test_untyped_activity_gets_no_reply() {
    let app = app();

    let (status, ack) = post_activity(
        &app,
        json!({ "text": "hello", "conversation": { "id": "c" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(ack["id"].is_string());

    let (_, set) = poll(&app, "c", Some(0)).await;
    assert_eq!(set["watermark"], 0);
}

#[tokio::test]
async fn test_ingest_does_not_return_reply() {
    let app = app();

    let (status, ack) = post_activity(
        &app,
        json!({ "type": "message", "text": "hello", "conversation": { "id": "c" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ack = ack.as_object().unwrap();
    assert_eq!(ack.len(), 1);
    assert!(ack.contains_key("id"));
}

#[tokio::test]
async fn test_missing_conversation_id_is_client_error() {
    let app = app();

    let (status, body) = post_activity(&app, json!({ "type": "message", "text": "hello" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "InvalidRequest");
    assert!(body["error"]["message"].as_str().unwrap().contains("conversation"));

    let (_, health) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(health["conversations"], 0);
}

#[tokio::test]
async fn test_invalid_selection_payload_is_client_error() {
    let app = app();

    let (status, body) = post_activity(
        &app,
        json!({
            "type": "event",
            "name": "newsSelected",
            "value": { "url": "https://x" },
            "conversation": { "id": "c" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "InvalidPayload");

    let (_, set) = poll(&app, "c", Some(0)).await;
    assert_eq!(set["watermark"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/messages")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_selection_then_question_references_topic() {
    let app = app();

    post_activity(
        &app,
        json!({
            "type": "event",
            "name": "item selected",
            "value": { "title": "X" },
            "conversation": { "id": "c" }
        }),
    )
    .await;
    post_activity(
        &app,
        json!({ "type": "message", "id": "q1", "text": "why", "conversation": { "id": "c" } }),
    )
    .await;

    let (_, set) = poll(&app, "c", Some(0)).await;
    assert_eq!(set["watermark"], 2);
    assert!(set["activities"][1]["text"].as_str().unwrap().contains("X"));
    assert_eq!(set["activities"][1]["replyToId"], "q1");
}

#[tokio::test]
async fn test_incremental_polling() {
    let app = app();
    for text in ["hello", "hi"] {
        post_activity(
            &app,
            json!({ "type": "message", "text": text, "conversation": { "id": "c" } }),
        )
        .await;
    }

    let (_, all) = poll(&app, "c", Some(0)).await;
    assert_eq!(all["watermark"], 2);
    assert_eq!(all["activities"].as_array().unwrap().len(), 2);

    let (_, tail) = poll(&app, "c", Some(1)).await;
    assert_eq!(tail["watermark"], 2);
    assert_eq!(tail["activities"].as_array().unwrap().len(), 1);
    assert_eq!(tail["activities"][0]["id"], all["activities"][1]["id"]);

    let (_, caught_up) = poll(&app, "c", Some(2)).await;
    assert_eq!(caught_up["activities"].as_array().unwrap().len(), 0);
    assert_eq!(caught_up["watermark"], 2);
}

#[tokio::test]
async fn test_poll_unknown_conversation() {
    let app = app();

    let (status, set) = poll(&app, "nobody", Some(5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(set, json!({ "activities": [], "watermark": 0 }));
}

#[tokio::test]
async fn test_negative_watermark_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/conversations/c/activities?watermark=-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "InvalidRequest");
}

#[tokio::test]
async fn test_reset_state_route() {
    let app = app();
    post_activity(
        &app,
        json!({
            "type": "event",
            "name": "newsSelected",
            "value": { "title": "Tide" },
            "conversation": { "id": "c" }
        }),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, "/api/conversations/c/state", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    post_activity(
        &app,
        json!({ "type": "message", "text": "why", "conversation": { "id": "c" } }),
    )
    .await;

    let (_, set) = poll(&app, "c", Some(1)).await;
    let text = set["activities"][0]["text"].as_str().unwrap();
    assert!(!text.contains("Tide"));
}

#[tokio::test]
async fn test_health_routes() {
    let app = app();

    let (status, root) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "OK");

    post_activity(
        &app,
        json!({ "type": "message", "text": "hello", "conversation": { "id": "c" } }),
    )
    .await;

    let (status, health) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["conversations"], 1);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = app();

    let (status, doc) = send(&app, Method::GET, "/api/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/messages").is_some());
    assert!(doc["paths"]
        .get("/api/conversations/{conversation_id}/activities")
        .is_some());

    let mut refs = Vec::new();
    collect_refs(&doc, &mut refs);
    assert!(refs.contains(&"#/components/schemas/Activity".to_string()));

    for reference in refs {
        let name = reference
            .strip_prefix("#/components/schemas/")
            .unwrap_or_else(|| panic!("unexpected $ref {}", reference));
        assert!(
            doc["components"]["schemas"].get(name).is_some(),
            "$ref {} has no schema",
            reference
        );
    }
}

fn collect_refs(value: &Value, refs: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("$ref", Value::String(target)) => refs.push(target.clone()),
                    _ => collect_refs(child, refs),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_refs(item, refs)),
        _ => {}
    }
}

#[tokio::test]
async fn test_api_error_response() {
    let response = ApiError::InvalidRequest("Test error".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ApiError::Store(StoreError::Unavailable("disk gone".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "InternalError");
    assert_eq!(body["error"]["message"], "Storage error");
}
