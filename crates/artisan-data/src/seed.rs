//! Bundled fixture data.

use std::sync::Arc;

use artisan_commerce::catalog::{Category, Product, Review, SellerOffer, Shop};
use artisan_commerce::checkout::Order;
use serde::de::DeserializeOwned;

use crate::latency::Latency;
use crate::memory::MockRepository;
use crate::repository::Record;
use crate::storefront::Repositories;
use crate::RepoError;

const PRODUCTS: &str = include_str!("../fixtures/products.json");
const SHOPS: &str = include_str!("../fixtures/shops.json");
const OFFERS: &str = include_str!("../fixtures/offers.json");
const REVIEWS: &str = include_str!("../fixtures/reviews.json");
const CATEGORIES: &str = include_str!("../fixtures/categories.json");
const ORDERS: &str = include_str!("../fixtures/orders.json");

/// Ids of products created by sellers start above this.
pub const SELLER_PRODUCT_ID_BASE: u64 = 1000;

/// The sample marketplace.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub products: Vec<Product>,
    pub shops: Vec<Shop>,
    pub offers: Vec<SellerOffer>,
    pub reviews: Vec<Review>,
    pub categories: Vec<Category>,
    pub orders: Vec<Order>,
}

impl Fixtures {
    /// Parse the bundled fixtures.
    pub fn load() -> Result<Self, RepoError> {
        Ok(Self {
            products: parse(PRODUCTS)?,
            shops: parse(SHOPS)?,
            offers: parse(OFFERS)?,
            reviews: parse(REVIEWS)?,
            categories: parse(CATEGORIES)?,
            orders: parse(ORDERS)?,
        })
    }

    /// In-memory repositories holding the fixtures.
    pub fn into_repositories(self, latency: Latency) -> Repositories {
        Repositories {
            products: Arc::new(
                MockRepository::with_records(self.products)
                    .latency(latency)
                    .id_base(SELLER_PRODUCT_ID_BASE),
            ),
            shops: Arc::new(MockRepository::with_records(self.shops).latency(latency)),
            offers: Arc::new(MockRepository::with_records(self.offers).latency(latency)),
            reviews: Arc::new(MockRepository::with_records(self.reviews).latency(latency)),
            categories: Arc::new(MockRepository::with_records(self.categories).latency(latency)),
            orders: Arc::new(MockRepository::with_records(self.orders).latency(latency)),
        }
    }
}

fn parse<T: Record + DeserializeOwned>(json: &str) -> Result<Vec<T>, RepoError> {
    serde_json::from_str(json).map_err(|e| RepoError::Fixture(format!("{}: {}", T::KIND, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        let fixtures = Fixtures::load().unwrap();
        assert_eq!(fixtures.products.len(), 6);
        assert_eq!(fixtures.shops.len(), 4);
        assert!(fixtures.products.iter().all(|p| !p.images.is_empty()));
    }

    #[test]
    fn test_fixture_offers_unique_per_shop() {
        let fixtures = Fixtures::load().unwrap();
        let mut pairs: Vec<_> = fixtures
            .offers
            .iter()
            .map(|o| (o.product_id, o.shop_id))
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), before);
    }
}
