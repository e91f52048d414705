//! Error types module
//!
//! Every failure an upload request can end in is an `AppError` variant. Variants
//! self-describe their HTTP presentation through [`ErrorMetadata`] so the API crate
//! only has to render them.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected callers and timeouts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No files provided")]
    EmptyPayload,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Upload timed out after {0}s")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Generic message for failures that carry nothing the caller can act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed due to a server error";

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", LogLevel::Warn),
        AppError::EmptyPayload => (400, "EMPTY_PAYLOAD", LogLevel::Debug),
        AppError::MalformedRequest(_) => (400, "MALFORMED_REQUEST", LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::Misconfigured(_) => (500, "STORAGE_MISCONFIGURED", LogLevel::Error),
        AppError::UploadFailed(_) => (500, "UPLOAD_FAILED", LogLevel::Error),
        AppError::Timeout(_) => (504, "UPLOAD_TIMEOUT", LogLevel::Warn),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::EmptyPayload => "No files provided".to_string(),
            AppError::MalformedRequest(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Misconfigured(msg) => msg.clone(),
            AppError::UploadFailed(msg) => msg.clone(),
            AppError::Timeout(secs) => format!("Upload timed out after {}s", secs),
            AppError::Internal(msg) => {
                if msg.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

impl AppError {
    /// Variant name, used as a structured logging field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::EmptyPayload => "EmptyPayload",
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Misconfigured(_) => "Misconfigured",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::Timeout(_) => "Timeout",
            AppError::Internal(_) => "Internal",
        }
    }
}
