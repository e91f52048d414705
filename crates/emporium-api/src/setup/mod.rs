//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! so tests can build the same router around their own state.

pub mod routes;
pub mod server;
pub mod storage;

use crate::services::upload::MediaUploadService;
use crate::state::AppState;
use anyhow::{Context, Result};
use emporium_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config.base.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        failure_policy = ?config.upload.failure_policy,
        owner_routing = ?config.upload.owner_routing,
        "Configuration loaded"
    );

    // A broken storage setup is reported per request, not at startup
    let storage = storage::setup_storage(&config.storage).await;

    let upload_service = MediaUploadService::new(storage, config.upload.failure_policy);
    let state = Arc::new(AppState::new(config.upload.clone(), upload_service));

    let router = routes::setup_routes(&config, state.clone())
        .context("Failed to build routes")?;

    Ok((state, router))
}
