//! Order types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::ids::{CustomerId, OrderId, ProductId, SellerId, ShopId};
use crate::money::{Currency, Money};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, not yet seen by the seller.
    #[default]
    New,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(OrderStatus::New),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(CommerceError::ValidationError(format!(
                "Unknown status: {}. Available: new, processing, shipped, completed, cancelled",
                s.trim()
            ))),
        }
    }
}

/// A purchased line, copied from the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            title: line.title.clone(),
            variant_label: line.variant_label.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// An order placed with a single shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// Seller who fulfils the order, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    pub shop_id: ShopId,
    pub lines: Vec<OrderLine>,
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Order {
    /// Create a new order from cart lines of one shop.
    ///
    /// The id is a placeholder until the repository assigns one.
    pub fn from_lines(
        customer_id: CustomerId,
        shop_id: ShopId,
        lines: &[CartLine],
    ) -> Result<Self, CommerceError> {
        let currency = lines
            .first()
            .map_or(Currency::default(), |l| l.unit_price.currency);
        let mut total = Money::zero(currency);
        for line in lines {
            let line_total = line.line_total()?;
            total = total.try_add(&line_total).ok_or_else(|| {
                if line_total.currency != currency {
                    CommerceError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: line_total.currency.code().to_string(),
                    }
                } else {
                    CommerceError::Overflow
                }
            })?;
        }

        Ok(Self {
            id: OrderId::new(0),
            customer_id,
            seller_id: None,
            shop_id,
            lines: lines.iter().map(OrderLine::from).collect(),
            total,
            status: OrderStatus::New,
            created_at: crate::current_timestamp(),
            shipped_at: None,
            completed_at: None,
        })
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Move to `status`.
    ///
    /// `shipped_at` and `completed_at` are stamped the first time those
    /// statuses are reached. Completed and cancelled orders are final.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), CommerceError> {
        if self.status == status {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(CommerceError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }

        let now = crate::current_timestamp();
        match status {
            OrderStatus::Shipped => {
                self.shipped_at.get_or_insert(now);
            }
            OrderStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            _ => {}
        }
        self.status = status;
        Ok(())
    }
}

/// Group cart lines by shop, keeping the order each shop first appears in.
pub fn split_by_shop(lines: &[CartLine]) -> Vec<(ShopId, Vec<CartLine>)> {
    let mut groups: Vec<(ShopId, Vec<CartLine>)> = Vec::new();
    for line in lines {
        match groups.iter_mut().find(|(shop, _)| *shop == line.shop_id) {
            Some((_, group)) => group.push(line.clone()),
            None => groups.push((line.shop_id, vec![line.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: u64, shop: u64, cents: i64, quantity: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(product),
            shop_id: ShopId::new(shop),
            title: format!("Product {}", product),
            unit_price: Money::new(cents, Currency::USD),
            image: String::new(),
            variant_label: None,
            shop_name: None,
            quantity,
        }
    }

    #[test]
    fn test_from_lines_totals() {
        let lines = [line(1, 1, 2800, 2), line(2, 1, 500, 1)];
        let order = Order::from_lines(CustomerId::new(1), ShopId::new(1), &lines).unwrap();
        assert_eq!(order.total, Money::new(6100, Currency::USD));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn test_status_timestamps() {
        let mut order =
            Order::from_lines(CustomerId::new(1), ShopId::new(1), &[line(1, 1, 100, 1)]).unwrap();
        order.set_status(OrderStatus::Processing).unwrap();
        assert!(order.shipped_at.is_none());

        order.set_status(OrderStatus::Shipped).unwrap();
        let shipped = order.shipped_at;
        assert!(shipped.is_some());

        order.set_status(OrderStatus::Completed).unwrap();
        assert!(order.completed_at.is_some());
        assert_eq!(order.shipped_at, shipped);
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut order =
            Order::from_lines(CustomerId::new(1), ShopId::new(1), &[line(1, 1, 100, 1)]).unwrap();
        order.set_status(OrderStatus::Cancelled).unwrap();
        assert!(matches!(
            order.set_status(OrderStatus::Shipped),
            Err(CommerceError::InvalidStatusTransition { .. })
        ));
        order.set_status(OrderStatus::Cancelled).unwrap();
    }

    #[test]
    fn test_split_by_shop() {
        let lines = [line(1, 2, 100, 1), line(2, 1, 100, 1), line(3, 2, 100, 1)];
        let groups = split_by_shop(&lines);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, ShopId::new(2));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, ShopId::new(1));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
