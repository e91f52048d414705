//! Upload progress reporting
//!
//! The orchestrator never logs directly; it reports to an injected observer so tests can
//! record what happened without capturing log output.

use emporium_core::{FilePayload, UploadOutcome, UploadRequest};
use emporium_storage::DestinationKey;

/// Receives the lifecycle events of one upload request
pub trait UploadObserver: Send + Sync {
    /// Fan-out is about to start
    fn on_request(&self, request: &UploadRequest);

    fn on_file_uploaded(
        &self,
        index: usize,
        file: &FilePayload,
        destination: &DestinationKey,
        url: &str,
    );

    fn on_file_failed(
        &self,
        index: usize,
        file: &FilePayload,
        destination: &DestinationKey,
        cause: &str,
    );

    /// Every upload of the request has settled
    fn on_settled(&self, outcomes: &[UploadOutcome]);
}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl UploadObserver for TracingObserver {
    fn on_request(&self, request: &UploadRequest) {
        tracing::info!(
            file_count = request.file_count(),
            media_kind = %request.media_kind,
            owner_kind = %request.owner.kind,
            owner_id = %request.owner.id,
            "Starting media upload"
        );
    }

    fn on_file_uploaded(
        &self,
        index: usize,
        file: &FilePayload,
        destination: &DestinationKey,
        url: &str,
    ) {
        tracing::info!(
            index,
            filename = %file.filename,
            size_bytes = file.size(),
            key = %destination.path(),
            url = %url,
            "File uploaded"
        );
    }

    fn on_file_failed(
        &self,
        index: usize,
        file: &FilePayload,
        destination: &DestinationKey,
        cause: &str,
    ) {
        tracing::error!(
            index,
            filename = %file.filename,
            size_bytes = file.size(),
            key = %destination.path(),
            error = %cause,
            "File upload failed"
        );
    }

    fn on_settled(&self, outcomes: &[UploadOutcome]) {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "Media upload settled"
        );
    }
}
