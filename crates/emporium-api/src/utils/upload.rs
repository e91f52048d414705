//! Multipart decoding for the upload endpoint

use axum::extract::Multipart;
use emporium_core::constants::{FILES_FIELD, MEDIA_TYPE_FIELD, PRODUCT_ID_FIELD, REMEDY_ID_FIELD};
use emporium_core::{
    AppError, FilePayload, MediaKind, OwnerRoutingPolicy, OwningEntityRef, RoutingFields,
    UploadRequest,
};

const DEFAULT_FILENAME: &str = "unknown";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Decode a multipart submission into an `UploadRequest`.
///
/// Every part named `files` becomes a payload, in submission order. Unknown parts and
/// repeats of `type`, `productId` or `remedyId` are ignored. Zero files is `EmptyPayload`, checked before owner routing.
pub async fn decode_upload_request(
    mut multipart: Multipart,
    routing: OwnerRoutingPolicy,
) -> Result<UploadRequest, AppError> {
    let mut files = Vec::new();
    let mut media_type: Option<String> = None;
    let mut product_id: Option<String> = None;
    let mut remedy_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedRequest(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FILES_FIELD => {
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                let content_type = field
                    .content_type()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::MalformedRequest(format!("Failed to read file data: {}", e))
                })?;

                files.push(FilePayload::new(filename, content_type, data));
            }
            // Repeated text fields: the first occurrence wins
            MEDIA_TYPE_FIELD if media_type.is_none() => {
                media_type = Some(read_text(field).await?)
            }
            PRODUCT_ID_FIELD if product_id.is_none() => {
                product_id = Some(read_text(field).await?)
            }
            REMEDY_ID_FIELD if remedy_id.is_none() => remedy_id = Some(read_text(field).await?),
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::EmptyPayload);
    }

    let media_kind = MediaKind::from_form_value(media_type.as_deref());
    let owner =
        OwningEntityRef::from_routing(&RoutingFields::new(product_id, remedy_id), routing)?;

    UploadRequest::new(files, media_kind, owner)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::MalformedRequest(format!("Failed to read field '{}': {}", name, e)))
}
