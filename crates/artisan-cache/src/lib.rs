//! Type-safe key-value storage for the Artisan storefront.
//!
//! Stands in for browser local storage: a small, ergonomic API over a byte
//! store with automatic JSON serialization. Two backends ship with the crate,
//! an in-memory map and a directory of JSON files.
//!
//! # Example
//!
//! ```rust
//! use artisan_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     product_id: u64,
//!     quantity: i64,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! // Store a value
//! cache.set("cart:default", &vec![Line { product_id: 1, quantity: 2 }]).unwrap();
//!
//! // Retrieve a value
//! let lines: Option<Vec<Line>> = cache.get("cart:default").unwrap();
//! assert_eq!(lines.map(|l| l.len()), Some(1));
//!
//! // Delete a value
//! cache.delete("cart:default").unwrap();
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore};
}
