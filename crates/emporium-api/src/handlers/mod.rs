pub mod health;
pub mod media_upload;
pub mod openapi;
