//! Emporium Storage Library
//!
//! This crate provides the storage capability used by the upload orchestrator: the
//! `MediaStorage` trait, the destination resolver that names every uploaded object,
//! and implementations for S3-compatible object storage and the local filesystem.
//!
//! # Storage key format
//!
//! Every object lives at `{folder}/{object_id}`:
//!
//! - `folder` is one of `products/images`, `products/videos`, `remedies/images`,
//!   `remedies/videos`, chosen by owner kind and media kind.
//! - `object_id` is `{entity_id}_{unix_millis}_{token}` with a random base-36 token.
//!
//! Key generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod traits;

// Re-export commonly used types
pub use emporium_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{resolve_folder, DestinationKey};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{MediaStorage, StorageError, StorageResult};
