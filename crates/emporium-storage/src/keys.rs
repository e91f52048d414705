//! Destination resolution shared by all storage backends.
//!
//! Folder: `{owner}s/{media}s` (e.g. `remedies/videos`). Object id:
//! `{entity_id}_{unix_millis}_{token}` where `token` is random base-36.

use chrono::Utc;
use emporium_core::constants::OBJECT_ID_TOKEN_LEN;
use emporium_core::{MediaKind, OwnerKind, OwningEntityRef};
use rand::Rng;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Where one file is written
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DestinationKey {
    pub folder: String,
    pub object_id: String,
}

impl DestinationKey {
    /// Capture a fresh destination for one file of `owner`.
    ///
    /// The timestamp and token are taken at call time, so callers invoke this per
    /// file right before that file's upload starts.
    pub fn generate(owner: &OwningEntityRef, media_kind: MediaKind) -> Self {
        Self {
            folder: resolve_folder(owner.kind, media_kind).to_string(),
            object_id: object_id(
                &owner.id,
                Utc::now().timestamp_millis(),
                &random_token(OBJECT_ID_TOKEN_LEN),
            ),
        }
    }

    /// Full object path, `{folder}/{object_id}`
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.object_id)
    }
}

/// Storage folder for an owner kind and media kind
pub fn resolve_folder(owner: OwnerKind, media_kind: MediaKind) -> &'static str {
    match (owner, media_kind) {
        (OwnerKind::Remedy, MediaKind::Video) => "remedies/videos",
        (OwnerKind::Remedy, MediaKind::Image) => "remedies/images",
        (OwnerKind::Product, MediaKind::Video) => "products/videos",
        (OwnerKind::Product, MediaKind::Image) => "products/images",
    }
}

/// `{entity_id}_{timestamp_millis}_{token}`. The entity id is used verbatim, even empty.
pub fn object_id(entity_id: &str, timestamp_millis: i64, token: &str) -> String {
    format!("{}_{}_{}", entity_id, timestamp_millis, token)
}

/// Random lowercase base-36 token of `len` characters
pub fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}
