//! Emporium Core Library
//!
//! This crate provides the media upload domain model, error types and configuration
//! shared by the storage backends and the HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    FailurePolicy, FilePayload, FileFailure, MediaKind, OwnerKind, OwnerRoutingPolicy,
    OwningEntityRef, RoutingFields, UploadOutcome, UploadRequest, UploadResponse,
};
pub use storage_types::StorageBackend;
