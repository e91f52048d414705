//! In-memory `MediaStorage` for tests
//!
//! Records every upload, counts calls, and can be told to delay or fail uploads whose
//! payload matches given bytes.

use crate::keys::DestinationKey;
use crate::traits::{MediaStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use emporium_core::MediaKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Base URL the mock hands out
pub const MOCK_CDN_BASE: &str = "https://cdn.example.com";

/// One upload the mock received
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub destination: DestinationKey,
    pub resource_kind: MediaKind,
    pub content_type: String,
    pub data: Bytes,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
struct PayloadRule {
    payload: Bytes,
    delay: Option<Duration>,
    error: Option<String>,
}

/// Mock storage implementation that keeps uploads in memory
#[derive(Clone, Default)]
pub struct MockStorage {
    calls: Arc<AtomicUsize>,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    rules: Arc<Mutex<Vec<PayloadRule>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail uploads whose payload equals `payload` with `message`
    pub fn fail_on_payload(self, payload: &'static [u8], message: &str) -> Self {
        self.rules.lock().unwrap().push(PayloadRule {
            payload: Bytes::from_static(payload),
            delay: None,
            error: Some(message.to_string()),
        });
        self
    }

    /// Hold uploads whose payload equals `payload` for `delay` before settling
    pub fn delay_on_payload(self, payload: &'static [u8], delay: Duration) -> Self {
        self.rules.lock().unwrap().push(PayloadRule {
            payload: Bytes::from_static(payload),
            delay: Some(delay),
            error: None,
        });
        self
    }

    /// Number of times `upload` was invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Uploads in the order they settled
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Payload stored under `url`, if any upload produced it
    pub fn payload_for_url(&self, url: &str) -> Option<Bytes> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.url.as_deref() == Some(url))
            .map(|u| u.data.clone())
    }
}

#[async_trait]
impl MediaStorage for MockStorage {
    async fn upload(
        &self,
        destination: &DestinationKey,
        resource_kind: MediaKind,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (delay, error) = {
            let rules = self.rules.lock().unwrap();
            let matching = rules.iter().filter(|r| r.payload == data);
            let mut delay = None;
            let mut error = None;
            for rule in matching {
                delay = delay.or(rule.delay);
                error = error.or_else(|| rule.error.clone());
            }
            (delay, error)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let url = match error {
            Some(_) => None,
            None => Some(format!("{}/{}", MOCK_CDN_BASE, destination.path())),
        };

        self.uploads.lock().unwrap().push(RecordedUpload {
            destination: destination.clone(),
            resource_kind,
            content_type: content_type.to_string(),
            data,
            url: url.clone(),
        });

        match error {
            Some(message) => Err(StorageError::UploadFailed(message)),
            None => Ok(url.unwrap_or_default()),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
