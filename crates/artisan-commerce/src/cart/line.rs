use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{ProductId, ShopId};
use crate::money::Money;
use crate::resolve::{DisplayValues, Selections};

/// One aggregated product and quantity entry in a cart.
///
/// Display fields are copied from the product when the line is created, so
/// the cart renders without a catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Shop the line is bought from. Checkout creates one order per shop.
    pub shop_id: ShopId,
    pub title: String,
    pub unit_price: Money,
    pub image: String,
    /// Selected variant values, e.g. "Red / Large".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Always at least 1 once stored in a cart.
    pub quantity: i64,
}

impl CartLine {
    /// Build a line from resolved display values.
    pub fn from_product(
        product: &Product,
        display: &DisplayValues,
        selections: &Selections,
        shop_name: Option<&str>,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: product.id,
            shop_id: product.shop_id,
            title: product.title.clone(),
            unit_price: display.price,
            image: display.image.clone(),
            variant_label: selections.variant_label(),
            shop_name: shop_name.map(str::to_string),
            quantity,
        }
    }

    /// Build a line at the product's base price with no selections.
    pub fn from_base(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            shop_id: product.shop_id,
            title: product.title.clone(),
            unit_price: product.base_price,
            image: product.primary_image().unwrap_or_default().to_string(),
            variant_label: None,
            shop_name: None,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
