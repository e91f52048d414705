use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Kind of media being uploaded. Also the resource type handed to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Permissive parse of the `type` form field: only the literal `video` selects
    /// video, anything else (including absence) is an image.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Catalog item kind a media file is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    Product,
    Remedy,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::Product => "product",
            OwnerKind::Remedy => "remedy",
        }
    }
}

impl Display for OwnerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// How the two optional routing fields are turned into an owner.
///
/// `Lenient` keeps the storefront's historical behavior: the remedy branch is taken
/// whenever `remedyId` is set, the entity id is `productId` falling back to `remedyId`,
/// and a request with neither is routed to products with an empty id.
/// `Strict` requires exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerRoutingPolicy {
    #[default]
    Lenient,
    Strict,
}

impl FromStr for OwnerRoutingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(OwnerRoutingPolicy::Lenient),
            "strict" => Ok(OwnerRoutingPolicy::Strict),
            other => Err(anyhow::anyhow!(
                "Invalid owner routing policy '{}': expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

/// Raw routing fields as read from the form. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingFields {
    product_id: Option<String>,
    remedy_id: Option<String>,
}

impl RoutingFields {
    pub fn new(product_id: Option<String>, remedy_id: Option<String>) -> Self {
        Self {
            product_id: product_id.filter(|s| !s.is_empty()),
            remedy_id: remedy_id.filter(|s| !s.is_empty()),
        }
    }
}

/// The catalog item a submission is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwningEntityRef {
    pub kind: OwnerKind,
    pub id: String,
}

impl OwningEntityRef {
    pub fn new(kind: OwnerKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Resolve the owner from the form's routing fields under the given policy.
    pub fn from_routing(
        fields: &RoutingFields,
        policy: OwnerRoutingPolicy,
    ) -> Result<Self, AppError> {
        let product = fields.product_id.as_deref();
        let remedy = fields.remedy_id.as_deref();

        match policy {
            OwnerRoutingPolicy::Lenient => {
                let kind = if remedy.is_some() {
                    OwnerKind::Remedy
                } else {
                    OwnerKind::Product
                };
                let id = product.or(remedy).unwrap_or_default();
                Ok(Self::new(kind, id))
            }
            OwnerRoutingPolicy::Strict => match (product, remedy) {
                (Some(id), None) => Ok(Self::new(OwnerKind::Product, id)),
                (None, Some(id)) => Ok(Self::new(OwnerKind::Remedy, id)),
                (None, None) => Err(AppError::InvalidInput(
                    "Either productId or remedyId must be provided".to_string(),
                )),
                (Some(_), Some(_)) => Err(AppError::InvalidInput(
                    "Provide only one of productId or remedyId".to_string(),
                )),
            },
        }
    }
}
