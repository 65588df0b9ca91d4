use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Inventory below this (and above zero) counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Summary cards on the seller dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Products with inventory left.
    pub active_products: usize,
    pub total_inventory: i64,
    pub low_stock_products: usize,
}

impl DashboardStats {
    pub fn for_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut stats, p| {
            stats.total_products += 1;
            stats.total_inventory = stats.total_inventory.saturating_add(p.inventory);
            if p.inventory > 0 {
                stats.active_products += 1;
                if p.inventory < LOW_STOCK_THRESHOLD {
                    stats.low_stock_products += 1;
                }
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductId, ShopId};
    use crate::money::{Currency, Money};

    fn product(id: u64, inventory: i64) -> Product {
        Product::new(
            ProductId::new(id),
            ShopId::new(1),
            "Listing",
            Money::from_major(10, Currency::USD),
            inventory,
        )
    }

    #[test]
    fn test_stats() {
        let products = [product(1, 0), product(2, 3), product(3, 12), product(4, 4)];
        let stats = DashboardStats::for_products(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.active_products, 3);
        assert_eq!(stats.total_inventory, 19);
        assert_eq!(stats.low_stock_products, 2);
    }

    #[test]
    fn test_empty() {
        assert_eq!(DashboardStats::for_products(&[]), DashboardStats::default());
    }
}
