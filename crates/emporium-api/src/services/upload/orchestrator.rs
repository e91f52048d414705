//! Concurrent fan-out of one upload request to the storage capability

use std::sync::Arc;

use emporium_core::{
    ErrorMetadata, FilePayload, MediaKind, OwningEntityRef, UploadOutcome, UploadRequest,
};
use emporium_storage::{DestinationKey, MediaStorage};
use futures::future::join_all;

use super::observer::UploadObserver;
use crate::error::storage_error_to_app_error;

/// Issues one storage upload per file and waits for all of them.
///
/// Every upload runs to completion regardless of its siblings: nothing is cancelled when
/// one fails, and nothing is retried. Fan-out is unbounded, one future per submitted file,
/// all polled on the request's task.
pub struct UploadOrchestrator {
    storage: Arc<dyn MediaStorage>,
    observer: Arc<dyn UploadObserver>,
}

impl UploadOrchestrator {
    pub fn new(storage: Arc<dyn MediaStorage>, observer: Arc<dyn UploadObserver>) -> Self {
        Self { storage, observer }
    }

    /// Upload every file of `request`.
    ///
    /// The returned outcomes are index-aligned with `request.files()`, independent of the
    /// order in which the uploads finished.
    pub async fn upload_all(&self, request: &UploadRequest) -> Vec<UploadOutcome> {
        self.observer.on_request(request);

        let uploads = request
            .files()
            .iter()
            .enumerate()
            .map(|(index, file)| {
                self.upload_one(index, file, &request.owner, request.media_kind)
            });

        let outcomes = join_all(uploads).await;

        self.observer.on_settled(&outcomes);
        outcomes
    }

    async fn upload_one(
        &self,
        index: usize,
        file: &FilePayload,
        owner: &OwningEntityRef,
        media_kind: MediaKind,
    ) -> UploadOutcome {
        // Timestamp and token are taken on first poll, right before this file's write.
        let destination = DestinationKey::generate(owner, media_kind);

        match self
            .storage
            .upload(&destination, media_kind, &file.content_type, file.data.clone())
            .await
        {
            Ok(url) => {
                self.observer.on_file_uploaded(index, file, &destination, &url);
                UploadOutcome::Success { url }
            }
            Err(e) => {
                let cause = storage_error_to_app_error(e).client_message();
                self.observer.on_file_failed(index, file, &destination, &cause);
                UploadOutcome::Failure { cause }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::upload::TracingObserver;
    use emporium_core::OwnerKind;
    use emporium_storage::test_helpers::{MockStorage, MOCK_CDN_BASE};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl UploadObserver for RecordingObserver {
        fn on_request(&self, request: &UploadRequest) {
            self.events
                .lock()
                .unwrap()
                .push(format!("request:{}", request.file_count()));
        }

        fn on_file_uploaded(&self, index: usize, _: &FilePayload, _: &DestinationKey, _: &str) {
            self.events.lock().unwrap().push(format!("ok:{}", index));
        }

        fn on_file_failed(&self, index: usize, _: &FilePayload, _: &DestinationKey, _: &str) {
            self.events.lock().unwrap().push(format!("failed:{}", index));
        }

        fn on_settled(&self, outcomes: &[UploadOutcome]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("settled:{}", outcomes.len()));
        }
    }

    fn request(files: Vec<FilePayload>, kind: OwnerKind, id: &str) -> UploadRequest {
        UploadRequest::new(files, MediaKind::Image, OwningEntityRef::new(kind, id)).unwrap()
    }

    fn file(name: &str, data: &'static [u8]) -> FilePayload {
        FilePayload::new(name, "image/png", data)
    }

    #[tokio::test]
    async fn test_outcomes_follow_input_order_not_completion_order() {
        let storage = MockStorage::new()
            .delay_on_payload(b"first", Duration::from_millis(80))
            .delay_on_payload(b"second", Duration::from_millis(40));
        let orchestrator =
            UploadOrchestrator::new(Arc::new(storage.clone()), Arc::new(TracingObserver));

        let outcomes = orchestrator
            .upload_all(&request(
                vec![
                    file("a.png", b"first"),
                    file("b.png", b"second"),
                    file("c.png", b"third"),
                ],
                OwnerKind::Product,
                "p1",
            ))
            .await;

        // The mock records uploads as they settle: third, second, first.
        let settled: Vec<_> = storage.uploads().into_iter().map(|u| u.data).collect();
        assert_eq!(settled[0].as_ref(), b"third");
        assert_eq!(settled[2].as_ref(), b"first");

        let payloads: Vec<_> = outcomes
            .iter()
            .map(|o| storage.payload_for_url(o.url().unwrap()).unwrap())
            .collect();
        assert_eq!(payloads[0].as_ref(), b"first");
        assert_eq!(payloads[1].as_ref(), b"second");
        assert_eq!(payloads[2].as_ref(), b"third");
    }

    #[tokio::test]
    async fn test_failure_does_not_cancel_siblings() {
        let storage = MockStorage::new()
            .fail_on_payload(b"bad", "bucket unavailable")
            .delay_on_payload(b"slow", Duration::from_millis(50));
        let observer = Arc::new(RecordingObserver::default());
        let orchestrator = UploadOrchestrator::new(Arc::new(storage.clone()), observer.clone());

        let outcomes = orchestrator
            .upload_all(&request(
                vec![file("a.png", b"bad"), file("b.png", b"slow"), file("c.png", b"ok")],
                OwnerKind::Product,
                "p1",
            ))
            .await;

        assert_eq!(storage.call_count(), 3);
        assert_eq!(
            outcomes[0],
            UploadOutcome::Failure {
                cause: "bucket unavailable".to_string()
            }
        );
        assert!(outcomes[1].is_success());
        assert!(outcomes[2].is_success());

        let events = observer.events();
        assert_eq!(events.first().map(String::as_str), Some("request:3"));
        assert_eq!(events.last().map(String::as_str), Some("settled:3"));
        assert!(events.contains(&"failed:0".to_string()));
        assert!(events.contains(&"ok:1".to_string()));
        assert!(events.contains(&"ok:2".to_string()));
    }

    #[tokio::test]
    async fn test_uploads_land_in_resolved_folder_with_distinct_keys() {
        let storage = MockStorage::new();
        let orchestrator =
            UploadOrchestrator::new(Arc::new(storage.clone()), Arc::new(TracingObserver));

        let outcomes = orchestrator
            .upload_all(&request(
                vec![file("a.png", b"one"), file("b.png", b"two")],
                OwnerKind::Remedy,
                "r9",
            ))
            .await;

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 2);
        for upload in &uploads {
            assert_eq!(upload.destination.folder, "remedies/images");
            assert!(upload.destination.object_id.starts_with("r9_"));
            assert_eq!(upload.resource_kind, MediaKind::Image);
        }
        assert_ne!(
            uploads[0].destination.object_id,
            uploads[1].destination.object_id
        );
        for outcome in &outcomes {
            assert!(outcome
                .url()
                .unwrap()
                .starts_with(&format!("{}/remedies/images/r9_", MOCK_CDN_BASE)));
        }
    }
}
