use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{bearer_for, test_server};

fn server() -> axum_test::TestServer {
    // These tests never touch the upload directory.
    test_server(std::env::temp_dir())
}

// ── Root and health ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_service_running_at_root() {
    let server = server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "eKart Backend is Running");
}

#[tokio::test]
async fn should_expose_health_probes() {
    let server = server();
    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
}

// ── Request ids ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_stamp_generated_request_id_on_response() {
    let server = server();
    let response = server.get("/healthz").await;
    let id = response
        .header(axum::http::HeaderName::from_static("x-request-id"))
        .to_str()
        .unwrap()
        .to_owned();
    id.parse::<Uuid>().expect("response request id is not a uuid");
}

#[tokio::test]
async fn should_keep_client_supplied_request_id() {
    let server = server();
    let response = server
        .get("/healthz")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("proxy-supplied-7f3a"),
        )
        .await;
    assert_eq!(
        response.header(axum::http::HeaderName::from_static("x-request-id")),
        "proxy-supplied-7f3a"
    );
}

// ── Token extraction ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_orders_without_token() {
    let server = server();
    let response = server.get("/orders").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "NO_TOKEN");
    assert_eq!(body["message"], "no token");
}

#[tokio::test]
async fn should_reject_me_without_token() {
    let server = server();
    let response = server.get("/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "NO_TOKEN");
}

#[tokio::test]
async fn should_reject_malformed_bearer_token() {
    let server = server();
    let response = server
        .get("/orders")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_secret() {
    let server = server();
    let token =
        ekart::token::issue_token(Uuid::now_v7(), "user@example.com", "some-other-secret")
            .unwrap();
    let response = server.get("/orders").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

// ── Request validation ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_signup_with_missing_fields() {
    let server = server();
    let response = server
        .post("/auth/signup")
        .json(&json!({ "name": "bob", "email": "", "password": "pw" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_product_creation_with_missing_fields() {
    let server = server();
    let response = server
        .post("/products")
        .json(&json!({ "name": "widget" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_order_with_no_items() {
    let server = server();
    let token = bearer_for(Uuid::now_v7());
    let response = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({ "items": [] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_order_with_zero_quantity() {
    let server = server();
    let token = bearer_for(Uuid::now_v7());
    let response = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({
            "items": [{ "product_id": Uuid::now_v7(), "quantity": 0 }]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_QUANTITY");
}
