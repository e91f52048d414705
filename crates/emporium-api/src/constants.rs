/// Upload endpoint path
pub const UPLOAD_PATH: &str = "/api/upload-images";

/// Liveness endpoint path
pub const HEALTH_PATH: &str = "/health";

/// Generated OpenAPI document path
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Message returned when the admin session marker is missing or wrong
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";
