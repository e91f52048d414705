//! Media upload service
//!
//! Wires the storage capability, the observer and the failure policy together:
//! readiness check → fan-out → aggregation.

use std::sync::Arc;

use emporium_core::{AppError, FailurePolicy, UploadRequest, UploadResponse};

use super::aggregator::aggregate;
use super::observer::{TracingObserver, UploadObserver};
use super::orchestrator::UploadOrchestrator;
use super::types::StorageCapability;

pub struct MediaUploadService {
    storage: StorageCapability,
    observer: Arc<dyn UploadObserver>,
    failure_policy: FailurePolicy,
}

impl MediaUploadService {
    /// Create a new MediaUploadService reporting through `tracing`
    pub fn new(storage: StorageCapability, failure_policy: FailurePolicy) -> Self {
        Self::with_observer(storage, failure_policy, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        storage: StorageCapability,
        failure_policy: FailurePolicy,
        observer: Arc<dyn UploadObserver>,
    ) -> Self {
        Self {
            storage,
            observer,
            failure_policy,
        }
    }

    pub fn storage(&self) -> &StorageCapability {
        &self.storage
    }

    /// Upload every file of a decoded request and build the caller's response.
    ///
    /// A misconfigured storage capability fails here, before any upload is issued.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResponse, AppError> {
        let storage = self.storage.ready()?.clone();

        let orchestrator = UploadOrchestrator::new(storage, self.observer.clone());
        let outcomes = orchestrator.upload_all(&request).await;

        aggregate(request.files(), outcomes, self.failure_policy)
    }
}
