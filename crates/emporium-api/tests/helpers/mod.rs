//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p emporium-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use emporium_api::setup::routes;
use emporium_api::{AppState, MediaUploadService, StorageCapability};
use emporium_core::Config;
use emporium_storage::test_helpers::MockStorage;
use std::collections::HashMap;
use std::sync::Arc;

/// Cookie header carrying a valid admin session marker
pub const ADMIN_COOKIE: &str = "admin_authenticated=true";

pub const UPLOAD_PATH: &str = "/api/upload-images";

/// Test application: server plus the mock storage behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MockStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Configuration as loaded from an environment holding only `vars`.
pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key: &str| env.get(key).cloned())
        .expect("Failed to build test config")
}

/// Default configuration backed by a healthy mock storage.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(&[]), MockStorage::new())
}

pub fn setup_test_app_with(config: Config, storage: MockStorage) -> TestApp {
    let capability = StorageCapability::Ready(Arc::new(storage.clone()));
    TestApp {
        server: build_server(&config, capability),
        storage,
    }
}

/// App whose storage failed validation at startup.
pub fn setup_misconfigured_app(message: &str) -> TestServer {
    build_server(
        &test_config(&[]),
        StorageCapability::Misconfigured(message.to_string()),
    )
}

fn build_server(config: &Config, storage: StorageCapability) -> TestServer {
    let upload_service = MediaUploadService::new(storage, config.upload.failure_policy);
    let state = Arc::new(AppState::new(config.upload.clone(), upload_service));
    let app = routes::setup_routes(config, state).expect("Failed to build routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}
