//! Browse filters.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductType};
use crate::money::Money;
use crate::search::SortOption;

/// Sidebar filters. Every field is optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseFilter {
    /// Inclusive upper bound on the base price.
    #[serde(default)]
    pub max_price: Option<Money>,
    /// Category names; a product matches any of them.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub product_type: Option<ProductType>,
}

impl BrowseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    /// Check a product against every set filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(max) = &self.max_price {
            if product.base_price.amount_cents > max.amount_cents {
                return false;
            }
        }
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&product.category))
        {
            return false;
        }
        if let Some(product_type) = self.product_type {
            if product.product_type != product_type {
                return false;
            }
        }
        true
    }
}

/// Filter then sort a product listing into a new vector.
pub fn browse(products: &[Product], filter: &BrowseFilter, sort: SortOption) -> Vec<Product> {
    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();
    sort.apply(&mut results);
    results
}

/// Case-insensitive match of `query` against title, description or category.
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    product.title.to_lowercase().contains(&query)
        || product.description.to_lowercase().contains(&query)
        || product.category.to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductId, ShopId};
    use crate::money::Currency;

    fn product(id: u64, price: i64, category: &str, created_at: i64) -> Product {
        let mut p = Product::new(
            ProductId::new(id),
            ShopId::new(1),
            format!("Item {}", id),
            Money::from_major(price, Currency::USD),
            3,
        );
        p.category = category.to_string();
        p.created_at = created_at;
        p
    }

    fn catalog() -> Vec<Product> {
        let mut digital = product(4, 15, "Art", 40);
        digital.product_type = ProductType::Digital;
        vec![
            product(1, 28, "Pottery", 10),
            product(2, 98, "Home Decor", 30),
            product(3, 28, "Pottery", 20),
            digital,
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let results = browse(&catalog(), &BrowseFilter::new(), SortOption::Newest);
        assert_eq!(ids(&results), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_price_and_category_filters() {
        let filter = BrowseFilter::new()
            .max_price(Money::from_major(50, Currency::USD))
            .category("pottery")
            .category("Art");
        let results = browse(&catalog(), &filter, SortOption::PriceLow);
        assert_eq!(ids(&results), vec![4, 1, 3]);
    }

    #[test]
    fn test_product_type_filter() {
        let filter = BrowseFilter::new().product_type(ProductType::Digital);
        assert_eq!(ids(&browse(&catalog(), &filter, SortOption::Newest)), vec![4]);
    }

    #[test]
    fn test_price_high_is_stable() {
        let results = browse(&catalog(), &BrowseFilter::new(), SortOption::PriceHigh);
        assert_eq!(ids(&results), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_matches_query() {
        let mut p = product(1, 28, "Pottery", 0);
        p.title = "Handmade Ceramic Coffee Mug".into();
        p.description = "Wheel thrown stoneware".into();
        assert!(matches_query(&p, "ceramic"));
        assert!(matches_query(&p, "STONEWARE"));
        assert!(matches_query(&p, "pottery"));
        assert!(!matches_query(&p, "macrame"));
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("price-low".parse::<SortOption>().unwrap(), SortOption::PriceLow);
        assert!("oldest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::PriceHigh.as_str(), "price-high");
    }
}
