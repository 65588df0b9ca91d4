//! Placing orders from a cart.

use artisan_commerce::cart::CartManager;
use artisan_commerce::checkout::{split_by_shop, Order};
use artisan_commerce::ids::CustomerId;
use artisan_commerce::CommerceError;

use crate::storefront::Storefront;
use crate::RepoError;

impl Storefront {
    /// Turn the cart into one order per shop, then empty it.
    ///
    /// Every order is built before any is stored, so a missing shop or a
    /// bad line leaves both the cart and the order history untouched. If a
    /// write fails partway, the orders already stored are deleted again and
    /// the cart is kept.
    pub async fn checkout(
        &self,
        cart: &mut CartManager,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepoError> {
        if cart.is_empty() {
            return Err(CommerceError::ValidationError("Cart is empty".into()).into());
        }

        let mut pending = Vec::new();
        for (shop_id, lines) in split_by_shop(cart.list()) {
            let shop = self.shop(shop_id).await?;
            let mut order = Order::from_lines(customer_id, shop_id, &lines)?;
            order.seller_id = Some(shop.seller_id);
            pending.push(order);
        }

        let mut placed = Vec::with_capacity(pending.len());
        for order in pending {
            match self.repos.orders.create(order).await {
                Ok(order) => placed.push(order),
                Err(e) => {
                    self.discard_orders(&placed).await;
                    return Err(e);
                }
            }
        }
        cart.clear()?;

        tracing::info!(
            customer = %customer_id,
            orders = placed.len(),
            "checkout complete"
        );
        Ok(placed)
    }

    async fn discard_orders(&self, placed: &[Order]) {
        for order in placed {
            if let Err(e) = self.repos.orders.delete(order.id).await {
                tracing::warn!(order = %order.id, error = %e, "failed to roll back order");
            }
        }
    }
}
