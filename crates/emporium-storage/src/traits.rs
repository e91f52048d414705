//! Storage abstraction trait
//!
//! This module defines the capability the upload orchestrator writes through.

use crate::keys::DestinationKey;
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use emporium_core::MediaKind;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage capability
///
/// Implementations are shared read-only across every concurrent upload, so `upload`
/// takes `&self` and must not depend on per-call mutable state.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write one object at `destination` and return its durable (https) URL.
    ///
    /// `resource_kind` tells the backend whether the bytes are an image or a video.
    async fn upload(
        &self,
        destination: &DestinationKey,
        resource_kind: MediaKind,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
