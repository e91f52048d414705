//! Media upload pipeline: fan-out to storage, then aggregation into one response

mod aggregator;
mod observer;
mod orchestrator;
mod service;
mod types;

pub use aggregator::aggregate;
pub use observer::{TracingObserver, UploadObserver};
pub use orchestrator::UploadOrchestrator;
pub use service::MediaUploadService;
pub use types::StorageCapability;
