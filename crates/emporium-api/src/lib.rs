//! Emporium API Library
//!
//! This crate provides the HTTP handlers, the admin session gate and the upload
//! orchestration behind `POST /api/upload-images`.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{
    MediaUploadService, StorageCapability, TracingObserver, UploadObserver,
};
pub use state::AppState;
