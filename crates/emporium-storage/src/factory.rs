#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{MediaStorage, StorageBackend, StorageError, StorageResult};
use emporium_core::StorageConfig;
use std::sync::Arc;

fn required(value: &Option<String>, name: &str) -> StorageResult<String> {
    value
        .clone()
        .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

/// Create a storage backend based on configuration
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn MediaStorage>> {
    match config.backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let storage = S3Storage::new(
                required(&config.s3_bucket, "S3_BUCKET")?,
                config.s3_region().to_string(),
                config.s3_endpoint.clone(),
                required(&config.aws_access_key_id, "AWS_ACCESS_KEY_ID")?,
                required(&config.aws_secret_access_key, "AWS_SECRET_ACCESS_KEY")?,
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(
                required(&config.local_storage_path, "LOCAL_STORAGE_PATH")?,
                required(&config.local_storage_base_url, "LOCAL_STORAGE_BASE_URL")?,
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_local_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: Some(StorageBackend::Local),
            local_storage_path: Some(temp_dir.path().to_string_lossy().to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            ..Default::default()
        };
        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_missing_s3_credentials_is_config_error() {
        let config = StorageConfig {
            s3_bucket: Some("shop-media".to_string()),
            ..Default::default()
        };
        let result = create_storage(&config).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
