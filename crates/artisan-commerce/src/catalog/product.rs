//! Product and variant types.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::{SellerOffer, UsedOffer};
use crate::error::CommerceError;
use crate::ids::{ProductId, SellerId, ShopId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Selection key for the color dimension of a [`VariantMatrix`].
pub const COLOR_KEY: &str = "Color";
/// Selection key for the size dimension of a [`VariantMatrix`].
pub const SIZE_KEY: &str = "Size";

/// Product type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Handmade physical goods.
    #[default]
    Physical,
    /// Downloadable product.
    Digital,
    /// Made to order with buyer input.
    Customizable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Physical => "physical",
            ProductType::Digital => "digital",
            ProductType::Customizable => "customizable",
        }
    }

    /// Label shown on the product badge.
    pub fn badge_label(&self) -> &'static str {
        match self {
            ProductType::Physical => "Handmade",
            ProductType::Digital => "Digital Download",
            ProductType::Customizable => "Customizable",
        }
    }
}

impl FromStr for ProductType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Ok(ProductType::Physical),
            "digital" => Ok(ProductType::Digital),
            "customizable" => Ok(ProductType::Customizable),
            _ => Err(CommerceError::ValidationError(format!(
                "Unknown product type: {}. Available: physical, digital, customizable",
                s.trim()
            ))),
        }
    }
}

/// A product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Shop that lists the product.
    pub shop_id: ShopId,
    /// Seller who created the listing, for seller-managed products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Price used when no variant or seller overrides it.
    pub base_price: Money,
    /// Category name.
    pub category: String,
    /// Type of product.
    #[serde(default)]
    pub product_type: ProductType,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units available from the listing shop.
    pub inventory: i64,
    /// Variant dimensions in display order.
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Exact color x size availability, authoritative when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_matrix: Option<VariantMatrix>,
    /// Option value to image URL.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variant_images: BTreeMap<String, String>,
    /// Competing offers, joined with shop names at read time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sellers: Vec<SellerOffer>,
    /// Used-condition offers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub used_offers: Vec<UsedOffer>,
    /// Download location for digital products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_file_url: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Product {
    /// Create a physical product with no variants.
    pub fn new(
        id: ProductId,
        shop_id: ShopId,
        title: impl Into<String>,
        base_price: Money,
        inventory: i64,
    ) -> Self {
        Self {
            id,
            shop_id,
            seller_id: None,
            title: title.into(),
            description: String::new(),
            base_price,
            category: String::new(),
            product_type: ProductType::Physical,
            images: Vec::new(),
            inventory,
            variants: Vec::new(),
            variant_matrix: None,
            variant_images: BTreeMap::new(),
            sellers: Vec::new(),
            used_offers: Vec::new(),
            digital_file_url: None,
            created_at: crate::current_timestamp(),
            updated_at: None,
        }
    }

    /// Look up a variant dimension by name.
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// The first image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if this is a digital product.
    pub fn is_digital(&self) -> bool {
        self.product_type == ProductType::Digital
    }

    /// Check if the listing shop has stock.
    pub fn is_in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A named variant dimension (e.g., "Color") with its options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    /// Dimension name.
    pub name: String,
    /// Options in display order. Values are unique within a variant.
    pub options: Vec<VariantOption>,
}

impl Variant {
    pub fn new(name: impl Into<String>, options: Vec<VariantOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Look up an option by its value.
    pub fn option(&self, value: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One selectable option of a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantOption {
    /// Display value (e.g., "Ocean Blue").
    pub value: String,
    /// Absolute price when selected. Replaces the running price, never added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    /// Units available for this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Color swatch code (e.g., "#1E6091").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl VariantOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            price: None,
            stock: None,
            hex: None,
        }
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex = Some(hex.into());
        self
    }
}

/// Exhaustive price and stock table over color x size combinations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VariantMatrix {
    pub entries: Vec<MatrixEntry>,
}

impl VariantMatrix {
    pub fn new(entries: Vec<MatrixEntry>) -> Self {
        Self { entries }
    }

    /// Find the entry for an exact color and size.
    pub fn find(&self, color: &str, size: &str) -> Option<&MatrixEntry> {
        self.entries
            .iter()
            .find(|e| e.color == color && e.size == size)
    }
}

/// One concrete color and size combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixEntry {
    pub color: String,
    pub size: String,
    pub price: Money,
    pub stock: i64,
}

impl MatrixEntry {
    pub fn new(color: impl Into<String>, size: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            color: color.into(),
            size: size.into(),
            price,
            stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new(ProductId::new(1), ShopId::new(1), "Mug", usd(28), 12);
        assert_eq!(product.title, "Mug");
        assert_eq!(product.product_type, ProductType::Physical);
        assert!(product.is_in_stock());
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_variant_lookup() {
        let mut product = Product::new(ProductId::new(1), ShopId::new(1), "Mug", usd(28), 12);
        product.variants.push(Variant::new(
            "Color",
            vec![
                VariantOption::new("Ocean Blue").with_price(usd(28)),
                VariantOption::new("Red").with_price(usd(32)).with_hex("#C0392B"),
            ],
        ));

        let color = product.variant("Color").unwrap();
        assert_eq!(color.option("Red").unwrap().price, Some(usd(32)));
        assert!(color.option("Green").is_none());
        assert!(product.variant("Size").is_none());
    }

    #[test]
    fn test_matrix_find() {
        let matrix = VariantMatrix::new(vec![
            MatrixEntry::new("Red", "M", usd(30), 0),
            MatrixEntry::new("Red", "L", usd(32), 4),
        ]);
        assert_eq!(matrix.find("Red", "L").unwrap().stock, 4);
        assert!(matrix.find("Blue", "M").is_none());
    }

    #[test]
    fn test_product_type_labels() {
        assert_eq!("Digital".parse::<ProductType>().unwrap(), ProductType::Digital);
        let err = "bundle".parse::<ProductType>().unwrap_err();
        assert!(err.to_string().contains("Unknown product type: bundle"));
        assert_eq!(ProductType::Physical.badge_label(), "Handmade");
        assert_eq!(ProductType::Customizable.as_str(), "customizable");
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{
            "id": 3,
            "shop_id": 2,
            "title": "Macrame Wall Hanging",
            "description": "Knotted cotton",
            "base_price": {"amount_cents": 9800, "currency": "USD"},
            "category": "Home Decor",
            "inventory": 5,
            "created_at": 0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type, ProductType::Physical);
        assert!(product.variants.is_empty());
        assert!(product.sellers.is_empty());
        assert!(product.variant_matrix.is_none());
    }
}
