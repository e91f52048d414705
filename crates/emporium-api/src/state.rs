use emporium_core::UploadConfig;

use crate::services::upload::MediaUploadService;

/// Shared application state, handed to every handler behind an `Arc`
pub struct AppState {
    pub upload_config: UploadConfig,
    pub upload_service: MediaUploadService,
}

impl AppState {
    pub fn new(upload_config: UploadConfig, upload_service: MediaUploadService) -> Self {
        Self {
            upload_config,
            upload_service,
        }
    }
}
