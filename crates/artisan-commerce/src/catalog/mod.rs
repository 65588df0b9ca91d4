//! Product catalog module.
//!
//! Contains types for products, variants, seller offers, shops, reviews,
//! and categories.

mod category;
mod offer;
mod product;
mod review;
mod shop;

pub use category::Category;
pub use offer::{SellerOffer, UsedOffer};
pub use product::{
    MatrixEntry, Product, ProductType, Variant, VariantMatrix, VariantOption, COLOR_KEY, SIZE_KEY,
};
pub use review::{average_rating, Review, ReviewStatus};
pub use shop::Shop;
