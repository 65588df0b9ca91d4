//! Shopping cart module.
//!
//! A cart is an ordered list of [`CartLine`]s, at most one per product,
//! owned by a [`CartManager`] that persists it after every mutation.

mod line;
mod manager;

pub use line::CartLine;
pub use manager::{CartEvent, CartManager, DEFAULT_SESSION, MAX_QUANTITY_PER_LINE};
