//! Constants shared across crates

/// Multipart field carrying the uploaded files (repeatable)
pub const FILES_FIELD: &str = "files";

/// Multipart field selecting the media kind (`image` | `video`)
pub const MEDIA_TYPE_FIELD: &str = "type";

/// Multipart field routing the upload to a product
pub const PRODUCT_ID_FIELD: &str = "productId";

/// Multipart field routing the upload to a remedy
pub const REMEDY_ID_FIELD: &str = "remedyId";

/// Default name of the cookie carrying the admin session marker
pub const DEFAULT_ADMIN_SESSION_COOKIE: &str = "admin_authenticated";

/// Value the admin session marker must carry
pub const ADMIN_SESSION_SENTINEL: &str = "true";

/// Length of the base-36 token appended to every object id
pub const OBJECT_ID_TOKEN_LEN: usize = 8;
