//! Variant resolution.
//!
//! Pure functions that derive the displayed price, stock and image of a
//! product from the buyer's variant selections and chosen seller. Nothing
//! here mutates the product, and every function is total over well-formed
//! input: unmatched selections are ignored.

mod display;
mod image;
mod price;
mod selection;
mod seller;
mod stock;

pub use display::{resolve_display, DisplayValues};
pub use image::resolve_image;
pub use price::{option_price_delta, resolve_price};
pub use selection::Selections;
pub use seller::select_default_seller;
pub use stock::{resolve_stock, stock_label};
