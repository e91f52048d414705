use crate::keys::DestinationKey;
use crate::traits::{MediaStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use emporium_core::MediaKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation, for development
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/emporium/media")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:4000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path, rejecting keys that could escape the
    /// base storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStorage for LocalStorage {
    async fn upload(
        &self,
        destination: &DestinationKey,
        resource_kind: MediaKind,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let key = destination.path();
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            resource_kind = %resource_kind,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_core::{OwnerKind, OwningEntityRef};

    #[tokio::test]
    async fn test_upload_writes_under_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(temp_dir.path(), "http://localhost:4000/media/".to_string())
            .await
            .unwrap();

        let owner = OwningEntityRef::new(OwnerKind::Product, "p1");
        let destination = DestinationKey::generate(&owner, MediaKind::Image);
        let url = storage
            .upload(
                &destination,
                MediaKind::Image,
                "image/png",
                Bytes::from_static(b"png-bytes"),
            )
            .await
            .unwrap();

        assert_eq!(
            url,
            format!("http://localhost:4000/media/{}", destination.path())
        );
        let written = std::fs::read(temp_dir.path().join(destination.path())).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(temp_dir.path(), "http://localhost/media".to_string())
            .await
            .unwrap();

        let destination = DestinationKey {
            folder: "products/images".to_string(),
            object_id: "../../etc_1_abcde".to_string(),
        };
        let result = storage
            .upload(&destination, MediaKind::Image, "image/png", Bytes::new())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
