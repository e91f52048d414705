use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use emporium_core::{AppError, UploadResponse};
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::decode_upload_request;

/// Upload media handler
///
/// Runs behind the admin session gate. Decodes the multipart body, uploads every file
/// concurrently and answers once all of them have settled. Decoding and uploading share
/// one wall-clock ceiling; when it expires the whole request fails with 504.
///
/// # Errors
/// - `AppError::EmptyPayload` - no part named `files`
/// - `AppError::MalformedRequest` - body is not readable multipart
/// - `AppError::InvalidInput` - owner ids rejected under strict routing
/// - `AppError::Misconfigured` - storage credentials missing
/// - `AppError::UploadFailed` - a storage upload was rejected
/// - `AppError::Timeout` - the request ceiling expired
#[utoipa::path(
    post,
    path = "/api/upload-images",
    tag = "media",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "One or more `files` parts, optional `type` (image|video), optional `productId` or `remedyId`"),
    responses(
        (status = 200, description = "Files uploaded", body = UploadResponse),
        (status = 400, description = "No files or malformed request", body = ErrorResponse),
        (status = 401, description = "Missing admin session", body = ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Storage misconfigured or upload failed", body = ErrorResponse),
        (status = 504, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %Uuid::new_v4(), operation = "upload_media")
)]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let upload_config = &state.upload_config;

    match tokio::time::timeout(
        upload_config.request_timeout(),
        process_upload(&state, multipart),
    )
    .await
    {
        Ok(result) => Ok(Json(result?)),
        Err(_) => Err(AppError::Timeout(upload_config.request_timeout_secs).into()),
    }
}

/// Decode, upload and aggregate; everything the request ceiling covers
async fn process_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadResponse, AppError> {
    let multipart = multipart.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let request = decode_upload_request(multipart, state.upload_config.owner_routing).await?;
    state.upload_service.upload(request).await
}
