//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle, including cache hits, validation
//! tags and invalidation on writes.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use expiring_cache::{api::create_router, AppState, ResponseCache};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_test_app_with_ttl(Duration::from_secs(300))
}

fn create_test_app_with_ttl(ttl: Duration) -> Router {
    let state = AppState::new(ResponseCache::new(ttl));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn cache_source(response: &Response<Body>) -> &str {
    response.headers()["x-cache"].to_str().unwrap()
}

// == Cached Read Tests ==

#[tokio::test]
async fn test_list_served_from_cache_on_second_request() {
    let app = create_test_app();

    let first = send(&app, get("/api/items")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(cache_source(&first), "MISS");
    let etag = first.headers()[header::ETAG].clone();

    let second = send(&app, get("/api/items")).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(cache_source(&second), "HIT");
    assert_eq!(second.headers()[header::ETAG], etag);
    assert_eq!(body_to_json(second.into_body()).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_query_variants_share_cache_entry() {
    let app = create_test_app();

    send(&app, get("/api/items")).await;
    let with_query = send(&app, get("/api/items?page=2")).await;

    assert_eq!(cache_source(&with_query), "HIT");
}

#[tokio::test]
async fn test_write_invalidates_query_variant() {
    let app = create_test_app_with_ttl(Duration::from_secs(1));

    let before = send(&app, get("/api/items?page=1")).await;
    assert_eq!(cache_source(&before), "MISS");
    assert_eq!(cache_source(&send(&app, get("/api/items?page=1")).await), "HIT");

    let created = send(&app, json_request("POST", "/api/items", r#"{"title":"new"}"#)).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let after = send(&app, get("/api/items?page=1")).await;
    assert_eq!(cache_source(&after), "MISS");
    let json = body_to_json(after.into_body()).await;
    assert_eq!(json[0]["title"], "new");

    // Polling inside the ttl keeps serving the post-write body
    tokio::time::sleep(Duration::from_millis(600)).await;
    let polled = send(&app, get("/api/items?page=1")).await;
    assert_eq!(cache_source(&polled), "HIT");
    assert_eq!(body_to_json(polled.into_body()).await[0]["title"], "new");
}

#[tokio::test]
async fn test_if_none_match_returns_not_modified() {
    let app = create_test_app();

    let first = send(&app, get("/api/items")).await;
    let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();

    let conditional = Request::builder()
        .uri("/api/items")
        .header(header::IF_NONE_MATCH, etag.as_str())
        .body(Body::empty())
        .unwrap();
    let response = send(&app, conditional).await;

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(cache_source(&response), "HIT");
    assert_eq!(response.headers()[header::ETAG], etag.as_str());
}

#[tokio::test]
async fn test_stale_if_none_match_gets_full_body() {
    let app = create_test_app();

    let conditional = Request::builder()
        .uri("/api/items")
        .header(header::IF_NONE_MATCH, "\"outdated\"")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, conditional).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_source(&response), "MISS");
}

// == Write and Invalidation Tests ==

#[tokio::test]
async fn test_create_invalidates_cached_list() {
    let app = create_test_app();

    send(&app, get("/api/items")).await;

    let created = send(&app, json_request("POST", "/api/items", r#"{"title":"first"}"#)).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let item = body_to_json(created.into_body()).await;
    assert_eq!(item["id"], 1);

    let list = send(&app, get("/api/items")).await;
    assert_eq!(cache_source(&list), "MISS");
    let json = body_to_json(list.into_body()).await;
    assert_eq!(json[0]["title"], "first");
}

#[tokio::test]
async fn test_update_changes_etag() {
    let app = create_test_app();
    send(&app, json_request("POST", "/api/items", r#"{"title":"v1"}"#)).await;

    let before = send(&app, get("/api/items/1")).await;
    let etag_before = before.headers()[header::ETAG].clone();

    let updated = send(&app, json_request("PUT", "/api/items/1", r#"{"title":"v2"}"#)).await;
    assert_eq!(updated.status(), StatusCode::OK);

    let after = send(&app, get("/api/items/1")).await;
    assert_eq!(cache_source(&after), "MISS");
    assert_ne!(after.headers()[header::ETAG], etag_before);
    assert_eq!(body_to_json(after.into_body()).await["title"], "v2");
}

#[tokio::test]
async fn test_delete_invalidates_item() {
    let app = create_test_app();
    send(&app, json_request("POST", "/api/items", r#"{"title":"gone soon"}"#)).await;
    send(&app, get("/api/items/1")).await;

    let deleted = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/items/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let json = body_to_json(deleted.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("deleted"));

    let response = send(&app, get("/api/items/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_item() {
    let app = create_test_app();

    let response = send(&app, json_request("PUT", "/api/items/7", r#"{"title":"x"}"#)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = send(&app, json_request("POST", "/api/items", r#"{"invalid json"#)).await;

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_title_request() {
    let app = create_test_app();

    let response = send(&app, json_request("POST", "/api/items", r#"{"title":""}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_endpoint_counts_hits_and_misses() {
    let app = create_test_app();

    send(&app, get("/api/items")).await; // miss + insertion
    send(&app, get("/api/items")).await; // hit
    send(&app, json_request("POST", "/api/items", r#"{"title":"t"}"#)).await; // invalidation

    let response = send(&app, get("/stats")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["insertions"], 1);
    assert_eq!(json["invalidations"], 1);
    assert_eq!(json["total_entries"], 0);
    assert_eq!(json["ttl_seconds"], 300);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app_with_ttl(Duration::from_secs(1));

    assert_eq!(cache_source(&send(&app, get("/api/items")).await), "MISS");
    assert_eq!(cache_source(&send(&app, get("/api/items")).await), "HIT");

    // No access for a full ttl
    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache_source(&send(&app, get("/api/items")).await), "MISS");
}
