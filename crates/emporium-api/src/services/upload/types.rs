//! Types shared by the upload pipeline

use std::sync::Arc;

use emporium_core::AppError;
use emporium_storage::MediaStorage;

/// The storage capability as resolved at startup.
///
/// A missing credential does not stop the server; it is kept here and reported to each
/// upload request that gets past the gate.
#[derive(Clone)]
pub enum StorageCapability {
    Ready(Arc<dyn MediaStorage>),
    Misconfigured(String),
}

impl StorageCapability {
    /// The storage client, or the configuration error that replaced it
    pub fn ready(&self) -> Result<&Arc<dyn MediaStorage>, AppError> {
        match self {
            StorageCapability::Ready(storage) => Ok(storage),
            StorageCapability::Misconfigured(message) => {
                Err(AppError::Misconfigured(message.clone()))
            }
        }
    }

    /// Short status for the health endpoint
    pub fn status(&self) -> String {
        match self {
            StorageCapability::Ready(storage) => storage.backend_type().to_string(),
            StorageCapability::Misconfigured(_) => "misconfigured".to_string(),
        }
    }
}

impl std::fmt::Debug for StorageCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageCapability::Ready(storage) => f
                .debug_tuple("Ready")
                .field(&storage.backend_type())
                .finish(),
            StorageCapability::Misconfigured(message) => {
                f.debug_tuple("Misconfigured").field(message).finish()
            }
        }
    }
}
