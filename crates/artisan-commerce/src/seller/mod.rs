//! Seller dashboard module.
//!
//! Form validation for listings and shops, and dashboard statistics.

mod form;
mod stats;

pub use form::{
    slugify, FieldErrors, OptionForm, ProductDraft, ProductForm, ShopDraft, ShopForm, VariantForm,
};
pub use stats::{DashboardStats, LOW_STOCK_THRESHOLD};
