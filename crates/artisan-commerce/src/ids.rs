//! Newtype IDs for type-safe identifiers.
//!
//! Every record in the storefront is keyed by a positive integer. Wrapping
//! each kind in its own type keeps a `ShopId` from being passed where a
//! `ProductId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an ID from its raw value.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The ID immediately after this one.
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifies a product listing.
    ProductId
);
define_id!(
    /// Identifies a shop.
    ShopId
);
define_id!(
    /// Identifies the seller (user) who owns a shop.
    SellerId
);
define_id!(
    /// Identifies a competing seller offer for a product.
    OfferId
);
define_id!(
    /// Identifies a customer review.
    ReviewId
);
define_id!(
    /// Identifies an order.
    OrderId
);
define_id!(
    /// Identifies a browse category.
    CategoryId
);
define_id!(
    /// Identifies a buying customer.
    CustomerId
);
