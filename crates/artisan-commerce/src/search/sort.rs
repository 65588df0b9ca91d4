use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;

/// Sort order for browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Most recently created first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        }
    }

    /// Sort in place. Stable, so equal keys keep catalog order.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            SortOption::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::PriceLow => products.sort_by_key(|p| p.base_price.amount_cents),
            SortOption::PriceHigh => {
                products.sort_by(|a, b| b.base_price.amount_cents.cmp(&a.base_price.amount_cents))
            }
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "price-low" | "price_low" => Ok(SortOption::PriceLow),
            "price-high" | "price_high" => Ok(SortOption::PriceHigh),
            _ => Err(CommerceError::ValidationError(format!(
                "Unknown sort: {}. Available: newest, price-low, price-high",
                s.trim()
            ))),
        }
    }
}
