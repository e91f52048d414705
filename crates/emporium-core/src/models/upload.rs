use std::str::FromStr;

use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

use super::media::{MediaKind, OwningEntityRef};
use crate::error::AppError;

/// One submitted file
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FilePayload {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A decoded submission. Always carries at least one file.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    files: Vec<FilePayload>,
    pub media_kind: MediaKind,
    pub owner: OwningEntityRef,
}

impl UploadRequest {
    pub fn new(
        files: Vec<FilePayload>,
        media_kind: MediaKind,
        owner: OwningEntityRef,
    ) -> Result<Self, AppError> {
        if files.is_empty() {
            return Err(AppError::EmptyPayload);
        }
        Ok(Self {
            files,
            media_kind,
            owner,
        })
    }

    pub fn files(&self) -> &[FilePayload] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Settled result of one file's upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { url: String },
    Failure { cause: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Success { url } => Some(url),
            UploadOutcome::Failure { .. } => None,
        }
    }
}

/// What to do when some files of a submission fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any failed file fails the whole request with the first error.
    #[default]
    AllOrNothing,
    /// Report successes alongside per-index failures, unless every file failed.
    Partial,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all_or_nothing" | "all-or-nothing" => Ok(FailurePolicy::AllOrNothing),
            "partial" => Ok(FailurePolicy::Partial),
            other => Err(anyhow::anyhow!(
                "Invalid upload failure policy '{}': expected 'all_or_nothing' or 'partial'",
                other
            )),
        }
    }
}

/// A file that failed under the partial policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FileFailure {
    pub index: usize,
    pub filename: String,
    pub error: String,
}

/// Response body of a successful upload request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// One entry per submitted file, in submission order. `null` only under the
    /// partial policy, at the index of a failed file.
    pub urls: Vec<Option<String>>,
    /// First successful URL, kept for single-image callers.
    #[serde(rename = "url")]
    pub primary_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::OwnerKind;

    #[test]
    fn test_upload_request_requires_files() {
        let result = UploadRequest::new(
            Vec::new(),
            MediaKind::Image,
            OwningEntityRef::new(OwnerKind::Product, "p1"),
        );
        assert!(matches!(result, Err(AppError::EmptyPayload)));
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!(
            "partial".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::Partial
        );
        assert_eq!(
            "ALL_OR_NOTHING".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::AllOrNothing
        );
        assert!("best_effort".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_response_serializes_legacy_url_field() {
        let response = UploadResponse {
            success: true,
            urls: vec![Some("https://cdn/a".to_string())],
            primary_url: "https://cdn/a".to_string(),
            failures: Vec::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["url"], "https://cdn/a");
        assert_eq!(json["urls"][0], "https://cdn/a");
        assert!(json.get("failures").is_none());
    }
}
