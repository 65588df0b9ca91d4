//! Place orders for the cart.

use anyhow::{Context as _, Result};
use artisan_commerce::checkout::split_by_shop;
use artisan_commerce::ids::CustomerId;
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Nothing to check out.");
        return Ok(());
    }

    // Step 1: Summary
    let groups = split_by_shop(cart.list());
    ctx.output.header("Checkout");
    ctx.output.step(1, 3, "Reviewing cart");
    for (_, lines) in &groups {
        let shop = lines
            .first()
            .and_then(|l| l.shop_name.clone())
            .unwrap_or_else(|| "Unknown shop".to_string());
        ctx.output.info(&shop);
        for line in lines {
            ctx.output.list_item(&format!(
                "{} x{} @ {}",
                line.title,
                line.quantity,
                line.unit_price.display()
            ));
        }
    }
    ctx.output.kv("subtotal", &cart.subtotal()?.display());
    ctx.output.kv("orders", &groups.len().to_string());

    // Step 2: Confirmation
    if !args.yes {
        ctx.output.blank();
        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    // Step 3: Place orders
    ctx.output.step(2, 3, "Placing orders");
    let storefront = ctx.storefront()?;
    let orders = ctx
        .output
        .waiting(
            "Placing orders",
            storefront.checkout(&mut cart, CustomerId::new(args.customer)),
        )
        .await
        .context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.step(3, 3, "Done!");
    for order in &orders {
        ctx.output.success(&format!(
            "Order #{} placed: {} item(s), {} [{}]",
            order.id,
            order.item_count(),
            order.total.display(),
            status_badge(order.status)
        ));
    }
    ctx.output.info("Run `artisan orders` to track your orders.");

    Ok(())
}
