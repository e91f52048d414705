pub mod media;
pub mod upload;

pub use media::{MediaKind, OwnerKind, OwnerRoutingPolicy, OwningEntityRef, RoutingFields};
pub use upload::{
    FailurePolicy, FileFailure, FilePayload, UploadOutcome, UploadRequest, UploadResponse,
};
