//! Shop types.

use std::collections::BTreeMap;

use crate::ids::{SellerId, ShopId};
use serde::{Deserialize, Serialize};

/// A seller's storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shop {
    /// Unique shop identifier.
    pub id: ShopId,
    /// Owning seller.
    pub seller_id: SellerId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    /// Network name to profile URL (e.g., "instagram").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Shop {
    /// Create a shop with no images or links.
    pub fn new(
        id: ShopId,
        seller_id: SellerId,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id,
            seller_id,
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            banner_image: None,
            logo_image: None,
            social_links: BTreeMap::new(),
            created_at: crate::current_timestamp(),
        }
    }
}
