//! Storefront domain types and logic for Artisan.
//!
//! - **Catalog**: products, variants, seller offers, shops, reviews, categories
//! - **Resolve**: displayed price, stock and image for a variant selection
//! - **Cart**: persisted cart with quantity merging
//! - **Search**: browse filters and sort orders
//! - **Seller**: listing and shop form validation, dashboard stats
//! - **Checkout**: orders split per shop
//!
//! # Example
//!
//! ```rust
//! use artisan_cache::Cache;
//! use artisan_commerce::prelude::*;
//!
//! let usd = |major| Money::from_major(major, Currency::USD);
//! let mut mug = Product::new(ProductId::new(1), ShopId::new(1), "Coffee Mug", usd(28), 12);
//! mug.variants.push(Variant::new(
//!     "Color",
//!     vec![
//!         VariantOption::new("Ocean Blue").with_price(usd(28)),
//!         VariantOption::new("Red").with_price(usd(32)),
//!     ],
//! ));
//!
//! let selections = Selections::new().with("Color", "Red");
//! let display = resolve_display(&mug, &selections, None);
//! assert_eq!(display.price, usd(32));
//!
//! let mut cart = CartManager::open_default(Cache::in_memory()).unwrap();
//! cart.add_item(CartLine::from_product(&mug, &display, &selections, None, 2)).unwrap();
//! assert_eq!(cart.item_count(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod resolve;
pub mod search;
pub mod seller;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, MatrixEntry, Product, ProductType, Review, ReviewStatus, SellerOffer, Shop,
        UsedOffer, Variant, VariantMatrix, VariantOption,
    };

    // Resolve
    pub use crate::resolve::{
        resolve_display, resolve_image, resolve_price, resolve_stock, select_default_seller,
        DisplayValues, Selections,
    };

    // Cart
    pub use crate::cart::{CartEvent, CartLine, CartManager};

    // Search
    pub use crate::search::{browse, BrowseFilter, SortOption};

    // Seller
    pub use crate::seller::{DashboardStats, FieldErrors, ProductForm, ShopForm};

    // Checkout
    pub use crate::checkout::{Order, OrderLine, OrderStatus};
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
