//! Storage setup and initialization

use emporium_core::{ErrorMetadata, StorageConfig};
use emporium_storage::create_storage;

use crate::services::upload::StorageCapability;

/// Validate the storage settings and build the client.
///
/// Never fails: missing credentials or a backend that cannot be constructed turn into
/// `StorageCapability::Misconfigured`, which every upload request then reports.
pub async fn setup_storage(config: &StorageConfig) -> StorageCapability {
    tracing::info!(backend = %config.backend(), "Initializing storage...");

    if let Err(e) = config.validate() {
        let message = e.client_message();
        tracing::error!(error = %message, "Storage is misconfigured; uploads will fail");
        return StorageCapability::Misconfigured(message);
    }

    match create_storage(config).await {
        Ok(storage) => {
            tracing::info!(
                backend = %storage.backend_type(),
                "Storage initialized successfully"
            );
            StorageCapability::Ready(storage)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize storage; uploads will fail");
            StorageCapability::Misconfigured(e.to_string())
        }
    }
}
