//! HTTP API tests.
//!
//! The router runs against the in-memory catalog and cache; no database or Redis needed.

mod support;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use product_service_lib::routes::create_router;
use product_service_lib::state::AppState;

use crate::support::{access_token, fixture, jwt_keys};

fn app() -> Router {
    let f = fixture();
    create_router(AppState::new(
        Arc::new(f.service),
        Arc::new(jwt_keys()),
        vec![],
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn lamp() -> Value {
    json!({
        "name": "Desk lamp",
        "description": "LED desk lamp",
        "price": "24.99",
        "stockQuantity": 10,
        "category": "Home",
        "sku": "LMP-001"
    })
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let (status, body) = send(app(), get("/api/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["data"]["totalCount"], 0);
    assert_eq!(body["data"]["pageNumber"], 1);
    assert_eq!(body["data"]["pageSize"], 10);
    assert_eq!(body["data"]["totalPages"], 0);
}

#[tokio::test]
async fn test_create_requires_token() {
    let (status, body) = send(app(), json_request("POST", "/api/products", None, lamp())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["errorCode"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_rejects_bad_token() {
    let request = json_request("POST", "/api/products", Some("not-a-jwt"), lamp());
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_then_list() {
    let app = app();
    let token = access_token(Uuid::new_v4());

    let (status, body) = send(
        app.clone(),
        json_request("POST", "/api/products", Some(&token), lamp()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isSuccess"], true);
    let id = body["data"]["productId"].as_str().unwrap().to_string();

    let (status, body) = send(app, get("/api/products?category=Home&minPrice=20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 1);
    assert_eq!(body["data"]["products"][0]["id"], id.as_str());
    assert_eq!(body["data"]["products"][0]["stockQuantity"], 10);
    assert_eq!(body["data"]["products"][0]["sku"], "LMP-001");
}

#[tokio::test]
async fn test_duplicate_sku_conflicts() {
    let app = app();
    let token = access_token(Uuid::new_v4());

    send(app.clone(), json_request("POST", "/api/products", Some(&token), lamp())).await;
    let (status, body) = send(
        app,
        json_request("POST", "/api/products", Some(&token), lamp()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "CONFLICT");
    assert_eq!(body["errorMessage"], "SKU 'LMP-001' already exists");
}

#[tokio::test]
async fn test_create_validation_error() {
    let token = access_token(Uuid::new_v4());
    let mut payload = lamp();
    payload["name"] = json!("");

    let (status, body) = send(
        app(),
        json_request("POST", "/api/products", Some(&token), payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unimplemented_routes() {
    let app = app();
    let token = access_token(Uuid::new_v4());
    let uri = format!("/api/products/{}", Uuid::new_v4());

    let (status, body) = send(app.clone(), get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["errorMessage"], "GetProductById query not implemented yet");

    let (status, body) = send(
        app.clone(),
        json_request("PUT", &uri, Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["errorCode"], "NOT_IMPLEMENTED");

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_writes_by_id_require_token() {
    let uri = format!("/api/products/{}", Uuid::new_v4());
    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_without_probes() {
    let (status, body) = send(app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
