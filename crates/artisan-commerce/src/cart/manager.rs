//! Persisted cart state.

use std::collections::HashSet;

use artisan_cache::{cache_key, Cache};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Session name used when none is configured.
pub const DEFAULT_SESSION: &str = "default";

/// What a cart mutation did, for the confirmation shown to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    /// A line was created or its quantity increased; `quantity` is the new total.
    Added { product_id: ProductId, quantity: i64 },
    /// A line's quantity was set.
    Updated { product_id: ProductId, quantity: i64 },
    Removed { product_id: ProductId },
    Cleared,
    /// Nothing changed (e.g., removing a product not in the cart).
    Unchanged,
}

impl CartEvent {
    /// Short confirmation message.
    pub fn message(&self) -> String {
        match self {
            CartEvent::Added { quantity, .. } => format!("Added to cart! ({} in cart)", quantity),
            CartEvent::Updated { quantity, .. } => format!("Quantity updated to {}", quantity),
            CartEvent::Removed { .. } => "Removed from cart".to_string(),
            CartEvent::Cleared => "Cart cleared".to_string(),
            CartEvent::Unchanged => "Cart unchanged".to_string(),
        }
    }
}

/// Owns the cart lines of one session and keeps them persisted.
///
/// The persisted record is either absent (empty cart) or holds the full
/// ordered list of lines. Every mutation is validated and written before it
/// becomes visible, so a failed write leaves the in-memory cart unchanged.
#[derive(Debug)]
pub struct CartManager {
    cache: Cache,
    key: String,
    lines: Vec<CartLine>,
}

impl CartManager {
    /// Open the cart for `session`, re-hydrating any persisted lines.
    ///
    /// A record that fails to parse, or that breaks the one-line-per-product
    /// rule, is discarded and the cart starts empty.
    pub fn open(cache: Cache, session: &str) -> Result<Self, CommerceError> {
        let key = cache_key!("cart", session);
        let lines = match cache.get::<Vec<CartLine>>(&key) {
            Ok(Some(lines)) if is_well_formed(&lines) => lines,
            Ok(Some(lines)) => {
                tracing::warn!(key = %key, lines = lines.len(), "discarding malformed cart record");
                cache.delete(&key)?;
                Vec::new()
            }
            Ok(None) => Vec::new(),
            Err(e) if e.is_corrupt() => {
                tracing::warn!(key = %key, error = %e, "discarding corrupt cart record");
                cache.delete(&key)?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(key = %key, lines = lines.len(), "cart loaded");
        Ok(Self { cache, key, lines })
    }

    /// Open the cart for [`DEFAULT_SESSION`].
    pub fn open_default(cache: Cache) -> Result<Self, CommerceError> {
        Self::open(cache, DEFAULT_SESSION)
    }

    /// Storage key of the persisted record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `line.quantity` units of the line's product.
    ///
    /// Merges into an existing line for the same product (keeping that line's
    /// display fields), otherwise appends the line.
    pub fn add_item(&mut self, line: CartLine) -> Result<CartEvent, CommerceError> {
        let quantity = line.quantity;
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let mut next = self.lines.clone();
        let total = match next.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                let total = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
                check_limit(total)?;
                existing.quantity = total;
                total
            }
            None => {
                check_limit(quantity)?;
                next.push(line.clone());
                quantity
            }
        };

        self.commit(next)?;
        Ok(CartEvent::Added {
            product_id: line.product_id,
            quantity: total,
        })
    }

    /// Add a product at its base price with no variant selections.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<CartEvent, CommerceError> {
        self.add_item(CartLine::from_base(product, quantity))
    }

    /// Set a line's quantity exactly. Zero or less removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartEvent, CommerceError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        check_limit(quantity)?;

        let mut next = self.lines.clone();
        match next.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) if line.quantity == quantity => return Ok(CartEvent::Unchanged),
            Some(line) => line.quantity = quantity,
            None => return Ok(CartEvent::Unchanged),
        }

        self.commit(next)?;
        Ok(CartEvent::Updated {
            product_id,
            quantity,
        })
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartEvent, CommerceError> {
        if !self.lines.iter().any(|l| l.product_id == product_id) {
            return Ok(CartEvent::Unchanged);
        }
        let next = self
            .lines
            .iter()
            .filter(|l| l.product_id != product_id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(CartEvent::Removed { product_id })
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Result<CartEvent, CommerceError> {
        let was_empty = self.lines.is_empty();
        self.commit(Vec::new())?;
        Ok(if was_empty {
            CartEvent::Unchanged
        } else {
            CartEvent::Cleared
        })
    }

    /// Total units across all lines (the cart badge), not the number of lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines in insertion order.
    pub fn list(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// An empty cart totals zero in the default currency.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let currency = self
            .lines
            .first()
            .map_or(Currency::default(), |l| l.unit_price.currency);

        let mut total = Money::zero(currency);
        for line in &self.lines {
            if line.unit_price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: line.unit_price.currency.code().to_string(),
                });
            }
            total = total
                .try_add(&line.line_total()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Persist `next` and make it the current state.
    fn commit(&mut self, next: Vec<CartLine>) -> Result<(), CommerceError> {
        if next.is_empty() {
            self.cache.delete(&self.key)?;
        } else {
            self.cache.set(&self.key, &next)?;
        }
        tracing::debug!(key = %self.key, lines = next.len(), "cart persisted");
        self.lines = next;
        Ok(())
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_LINE,
        ));
    }
    Ok(())
}

fn is_well_formed(lines: &[CartLine]) -> bool {
    let mut seen = HashSet::new();
    lines
        .iter()
        .all(|l| (1..=MAX_QUANTITY_PER_LINE).contains(&l.quantity) && seen.insert(l.product_id))
}
