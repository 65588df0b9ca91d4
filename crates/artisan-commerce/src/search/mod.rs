//! Browse module.
//!
//! Filtering, sorting and text matching over product listings.

mod filter;
mod sort;

pub use filter::{browse, matches_query, BrowseFilter};
pub use sort::SortOption;
