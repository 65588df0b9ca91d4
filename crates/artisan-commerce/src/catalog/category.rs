//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A browse category.
///
/// Products reference categories by name, so `name` is the join key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Icon name for the category tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            icon: None,
            image_url: None,
        }
    }

    /// Case-insensitive match against a product's category name.
    pub fn matches(&self, category: &str) -> bool {
        self.name.eq_ignore_ascii_case(category.trim())
    }
}
