//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::{collections::HashSet, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use santa_core::{matcher::Matcher, store::TokenStore};
use santa_store_memory::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{api_router, generate::GenerateResponse, reveal::RevealView};

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, value)
}

fn roster() -> Value {
  json!({
    "participants": [
      { "name": "Alice", "exclusions": ["bob"] },
      { "name": "Bob",   "exclusions": ["Alice", "Nobody"] },
      { "name": "Carol", "exclusions": [] },
      { "name": "Dave" },
    ]
  })
}

async fn generate(app: Router) -> GenerateResponse {
  let (status, body) = send(app, "POST", "/generate", Some(roster())).await;
  assert_eq!(status, StatusCode::OK, "body: {body}");
  serde_json::from_value(body).unwrap()
}

// ── Generate ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_returns_a_valid_assignment() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let resp = generate(app).await;

  let names: Vec<_> = resp.assignments.iter().map(|a| a.name.as_str()).collect();
  assert_eq!(names, ["Alice", "Bob", "Carol", "Dave"]);

  let recipients: HashSet<_> =
    resp.assignments.iter().map(|a| a.assigned_to.as_str()).collect();
  assert_eq!(recipients.len(), 4);

  for a in &resp.assignments {
    assert_ne!(a.name, a.assigned_to);
    assert_eq!(a.reveal_url, format!("/reveal/{}", a.reference));
  }

  let ids: HashSet<_> = resp.assignments.iter().map(|a| a.id).collect();
  assert_eq!(ids.len(), 4);
  assert_ne!(resp.assignments[0].assigned_to, "Bob");
  assert_ne!(resp.assignments[1].assigned_to, "Alice");
}

#[tokio::test]
async fn generate_with_two_participants_is_bad_request() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let body = json!({ "participants": [{ "name": "A" }, { "name": "B" }] });
  let (status, body) = send(app, "POST", "/generate", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("at least 3"), "body: {body}");
}

#[tokio::test]
async fn generate_without_participants_field_is_bad_request() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let (status, _) = send(app, "POST", "/generate", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_with_impossible_exclusions_is_unprocessable() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let body = json!({
    "participants": [
      { "name": "A", "exclusions": ["B", "C"] },
      { "name": "B" },
      { "name": "C" },
    ]
  });
  let (status, body) = send(app, "POST", "/generate", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("check your exclusions"));
}

#[tokio::test]
async fn generate_items_carry_an_id_outside_the_token() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let (status, body) = send(app, "POST", "/generate", Some(roster())).await;
  assert_eq!(status, StatusCode::OK);

  for item in body["assignments"].as_array().unwrap() {
    let id = item["id"].as_str().expect("id present");
    let token = item["reference"].as_str().unwrap();
    let record = santa_core::codec::decode(token).unwrap();
    assert_eq!(record.name, item["name"]);
    assert!(!token.contains(id));
  }
}

#[tokio::test]
async fn generate_accepts_null_exclusions() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let body = json!({
    "participants": [
      { "name": "A", "exclusions": null },
      { "name": "B" },
      { "name": "C", "exclusions": ["A"] },
    ]
  });
  let (status, body) = send(app, "POST", "/generate", Some(body)).await;
  assert_eq!(status, StatusCode::OK, "body: {body}");
}

#[tokio::test]
async fn malformed_generate_body_gets_json_error() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let (status, body) =
    send(app.clone(), "POST", "/generate", Some(json!({ "participants": 5 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string(), "body: {body}");

  let req = Request::builder()
    .method("POST")
    .uri("/generate")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn generate_with_duplicate_names_is_bad_request() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let body = json!({
    "participants": [{ "name": "Ann" }, { "name": "ann " }, { "name": "Ben" }]
  });
  let (status, _) = send(app, "POST", "/generate", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Reveal (stateless) ───────────────────────────────────────────────────────

#[tokio::test]
async fn token_reveal_shows_only_own_pairing() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let resp = generate(app.clone()).await;

  for a in &resp.assignments {
    let (status, body) = send(app.clone(), "GET", &a.reveal_url, None).await;
    assert_eq!(status, StatusCode::OK);
    let view: RevealView = serde_json::from_value(body).unwrap();
    assert_eq!(view.name, a.name);
    assert_eq!(view.assigned_to, a.assigned_to);
    assert_eq!(view.reveal_url, a.reveal_url);
  }
}

#[tokio::test]
async fn token_reveal_with_edited_token_is_not_found() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let (status, body) = send(app.clone(), "GET", "/reveal/bm90LWpzb24", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "assignment not found" }));

  let (status, _) = send(app, "GET", "/reveal/%7B%7D", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reveal_with_non_utf8_reference_is_not_found() {
  let app = api_router(Arc::new(TokenStore), Matcher::default());
  let (status, body) = send(app, "GET", "/reveal/%FF%FE", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "error": "assignment not found" }));
}

// ── Reveal (stateful) ────────────────────────────────────────────────────────

#[tokio::test]
async fn memory_reveal_resolves_latest_batch_only() {
  let store = Arc::new(MemoryStore::new());
  let app = api_router(store.clone(), Matcher::default());

  let first = generate(app.clone()).await;
  let second = generate(app.clone()).await;

  let (status, _) = send(app.clone(), "GET", &first.assignments[0].reveal_url, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = send(app, "GET", &second.assignments[0].reveal_url, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Alice");
  assert_eq!(body["assignedTo"], json!(second.assignments[0].assigned_to));
}

#[tokio::test]
async fn memory_reveal_unknown_key_is_not_found() {
  let app = api_router(Arc::new(MemoryStore::new()), Matcher::default());
  let (status, body) = send(app, "GET", "/reveal/does-not-exist", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "assignment not found");
}

#[tokio::test]
async fn failed_generate_keeps_previous_batch() {
  let store = Arc::new(MemoryStore::new());
  let app = api_router(store, Matcher::default());
  let first = generate(app.clone()).await;

  let body = json!({ "participants": [{ "name": "A" }] });
  let (status, _) = send(app.clone(), "POST", "/generate", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(app, "GET", &first.assignments[0].reveal_url, None).await;
  assert_eq!(status, StatusCode::OK);
}
