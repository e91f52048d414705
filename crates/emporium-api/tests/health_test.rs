//! Health and OpenAPI endpoint integration tests.

mod helpers;

use axum::http::StatusCode;
use serde_json::Value;

use helpers::{setup_misconfigured_app, setup_test_app};

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "local");
}

#[tokio::test]
async fn test_health_reports_misconfigured_storage() {
    let server = setup_misconfigured_app("Storage credentials are missing.");

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["storage"], "misconfigured");
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = setup_test_app();

    let response = app.client().get("/api/openapi.json").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(body["paths"]["/api/upload-images"]["post"].is_object());
}
