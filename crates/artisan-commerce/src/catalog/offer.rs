//! Competing seller offers for a product.

use crate::ids::{OfferId, ProductId, ShopId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shop's price, stock and terms for a product.
///
/// At most one offer exists per shop per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellerOffer {
    pub id: OfferId,
    pub product_id: ProductId,
    pub shop_id: ShopId,
    /// Shop display name, filled in by the repository join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Units this seller has available.
    pub stock: i64,
    /// Fast, guaranteed shipping.
    #[serde(default)]
    pub priority_fulfillment: bool,
    pub shipping_cost: Money,
    /// Estimated delivery time in days.
    pub delivery_days: u32,
    /// Share of positive ratings, 0 to 100.
    pub positive_rating_pct: u8,
    pub rating_count: u32,
}

impl SellerOffer {
    /// Name to show for this seller.
    pub fn display_name(&self) -> String {
        self.shop_name
            .clone()
            .unwrap_or_else(|| format!("Shop #{}", self.shop_id))
    }

    /// Free shipping when the shipping cost is zero.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_cost.is_zero()
    }
}

/// A used-condition offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsedOffer {
    pub id: OfferId,
    pub product_id: ProductId,
    pub shop_id: ShopId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Condition label (e.g., "Like New").
    pub condition: String,
    pub price: Money,
    pub stock: i64,
}
