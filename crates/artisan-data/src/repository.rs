//! The repository contract.
//!
//! Storefront code depends only on [`Repository`], so the in-memory mock can
//! be swapped for a real backend without touching callers.

use std::fmt;

use artisan_commerce::catalog::{Category, Product, Review, SellerOffer, Shop};
use artisan_commerce::checkout::Order;
use artisan_commerce::ids::{CategoryId, OfferId, OrderId, ProductId, ReviewId, ShopId};
use async_trait::async_trait;

use crate::RepoError;

/// A stored entity with an integer id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Typed id of the record.
    type Id: Copy + Eq + fmt::Display + From<u64> + Into<u64> + Send + Sync;

    /// Label used in not-found errors (e.g., "Product").
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);
}

/// Async CRUD access to one collection.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Fetch one record, or [`RepoError::NotFound`].
    async fn get(&self, id: T::Id) -> Result<T, RepoError>;

    /// Fetch every record in storage order.
    async fn list(&self) -> Result<Vec<T>, RepoError>;

    /// Records matching `predicate`, in storage order.
    async fn find(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Sync)) -> Result<Vec<T>, RepoError> {
        Ok(self.list().await?.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Store a new record. The repository assigns the id; the stored record is returned.
    async fn create(&self, record: T) -> Result<T, RepoError>;

    /// Replace the record with the same id.
    async fn update(&self, record: T) -> Result<T, RepoError>;

    /// Remove a record by id.
    async fn delete(&self, id: T::Id) -> Result<(), RepoError>;
}

/// Next id after the highest of `ids`, never at or below `base`.
pub(crate) fn next_id(ids: impl Iterator<Item = u64>, base: u64) -> u64 {
    ids.max().unwrap_or(0).max(base) + 1
}

macro_rules! impl_record {
    ($ty:ty, $id:ty, $kind:expr) => {
        impl Record for $ty {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }
        }
    };
}

impl_record!(Product, ProductId, "Product");
impl_record!(Shop, ShopId, "Shop");
impl_record!(SellerOffer, OfferId, "Offer");
impl_record!(Review, ReviewId, "Review");
impl_record!(Category, CategoryId, "Category");
impl_record!(Order, OrderId, "Order");
