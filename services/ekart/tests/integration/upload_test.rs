use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};

use ekart::domain::types::MAX_IMAGE_BYTES;

use crate::helpers::{TEST_BASE_URL, test_server};

fn image_form(field: &str, filename: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        field.to_owned(),
        Part::bytes(bytes).file_name(filename.to_owned()),
    )
}

#[tokio::test]
async fn should_store_image_and_serve_it_back() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path().to_path_buf());
    let payload = vec![0xAB_u8; 64];

    let response = server
        .post("/upload")
        .multipart(image_form("image", "cat.png", payload.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    let url = body["url"].as_str().unwrap();
    let prefix = format!("{TEST_BASE_URL}/uploads/");
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    // The stored file is reachable through the static file route.
    let filename = url.strip_prefix(TEST_BASE_URL).unwrap();
    let served = server.get(filename).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().as_ref(), payload.as_slice());
}

#[tokio::test]
async fn should_reject_disallowed_extension() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path().to_path_buf());

    let response = server
        .post("/upload")
        .multipart(image_form("image", "payload.svg", vec![0u8; 16]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "UNSUPPORTED_IMAGE_TYPE");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn should_reject_upload_without_image_field() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path().to_path_buf());

    let response = server
        .post("/upload")
        .multipart(image_form("file", "cat.png", vec![0u8; 16]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "NO_FILE");
}

#[tokio::test]
async fn should_reject_image_above_size_cap() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path().to_path_buf());

    let response = server
        .post("/upload")
        .multipart(image_form("image", "big.jpg", vec![0u8; MAX_IMAGE_BYTES + 1]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "IMAGE_TOO_LARGE");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}
