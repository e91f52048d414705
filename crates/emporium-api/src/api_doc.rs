//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use emporium_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emporium Media API",
        version = "0.1.0",
        description = "Admin media upload for the storefront catalog. Files are stored under products/ or remedies/ by owner and media kind."
    ),
    paths(
        handlers::media_upload::upload_media,
        handlers::health::health_check,
    ),
    components(schemas(
        models::UploadResponse,
        models::FileFailure,
        models::MediaKind,
        models::OwnerKind,
        error::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "media", description = "Media upload"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_path() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/api/upload-images"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
