//! Order history commands.

use anyhow::Result;
use artisan_commerce::checkout::{Order, OrderStatus};
use artisan_commerce::ids::{CustomerId, OrderId};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    match args.command {
        Some(OrdersCommand::List) | None => {
            let customer = CustomerId::new(args.customer);
            let mut orders = ctx
                .output
                .waiting("Loading orders", storefront.orders_by_customer(customer))
                .await?;
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list_orders(&orders, ctx);
        }
        Some(OrdersCommand::Show { id }) => {
            let order = ctx
                .output
                .waiting("Loading order", storefront.order(OrderId::new(id)))
                .await?;
            show_order(&order, ctx);
        }
        Some(OrdersCommand::Status { id, status }) => {
            let status: OrderStatus = status.parse()?;
            let order = ctx
                .output
                .waiting(
                    "Updating order",
                    storefront.update_order_status(OrderId::new(id), status),
                )
                .await?;
            if ctx.output.is_json() {
                ctx.output.json(&order);
            } else {
                ctx.output.success(&format!(
                    "Order #{} is now {}",
                    order.id,
                    status_badge(order.status)
                ));
            }
        }
    }

    Ok(())
}

fn list_orders(orders: &[Order], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return;
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return;
    }

    let widths = [6, 22, 8, 6, 10, 12];
    ctx.output
        .table_row(&["ORDER", "PLACED", "SHOP", "ITEMS", "TOTAL", "STATUS"], &widths);
    ctx.output.info(&"-".repeat(74));
    for order in orders {
        ctx.output.table_row(
            &[
                &format!("#{}", order.id),
                &format_timestamp(order.created_at),
                &order.shop_id.to_string(),
                &order.item_count().to_string(),
                &order.total.display(),
                &status_badge(order.status),
            ],
            &widths,
        );
    }
    ctx.output.blank();
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
}

fn show_order(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Order #{}", order.id));
    ctx.output.kv("status", &status_badge(order.status));
    ctx.output.kv("placed", &format_timestamp(order.created_at));
    if let Some(at) = order.shipped_at {
        ctx.output.kv("shipped", &format_timestamp(at));
    }
    if let Some(at) = order.completed_at {
        ctx.output.kv("completed", &format_timestamp(at));
    }
    ctx.output.kv("shop", &order.shop_id.to_string());
    ctx.output.blank();
    for line in &order.lines {
        let options = line
            .variant_label
            .as_deref()
            .map(|l| format!(" ({})", l))
            .unwrap_or_default();
        ctx.output.list_item(&format!(
            "{}{} x{} @ {}",
            line.title,
            options,
            line.quantity,
            line.unit_price.display()
        ));
    }
    ctx.output.kv("total", &order.total.display());
}
