use axum::Json;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;

pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
