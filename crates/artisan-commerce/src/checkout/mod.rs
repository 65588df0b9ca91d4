//! Checkout module.
//!
//! Orders, and splitting a cart into one order per shop.

mod order;

pub use order::{split_by_shop, Order, OrderLine, OrderStatus};
