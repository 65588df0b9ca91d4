//! Cart management commands.

use anyhow::{bail, Result};
use artisan_commerce::cart::{CartEvent, CartManager};
use artisan_commerce::ids::ProductId;
use dialoguer::{Confirm, Select};

use super::{CartArgs, CartCommand, SelectionArgs};
use crate::commands::product::{add_to_cart, chosen_seller, load_page};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    let event = match args.command {
        Some(CartCommand::List) | None => return list_cart(&cart, ctx),
        Some(CartCommand::Add {
            product,
            quantity,
            selection,
        }) => add(&mut cart, product, quantity, &selection, ctx).await?,
        Some(CartCommand::Update { product, quantity }) => {
            cart.update_quantity(ProductId::new(product), quantity)?
        }
        Some(CartCommand::Remove { product }) => match product {
            Some(id) => cart.remove_item(ProductId::new(id))?,
            None => match pick_line(&cart)? {
                Some(id) => cart.remove_item(id)?,
                None => CartEvent::Unchanged,
            },
        },
        Some(CartCommand::Clear { yes }) => {
            if !yes && !cart.is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Clear cancelled");
                    return Ok(());
                }
            }
            cart.clear()?
        }
    };

    report(&event, &cart, ctx);
    Ok(())
}

async fn add(
    cart: &mut CartManager,
    product: u64,
    quantity: i64,
    selection: &SelectionArgs,
    ctx: &Context,
) -> Result<CartEvent> {
    if quantity <= 0 {
        bail!("Quantity must be at least 1");
    }
    let storefront = ctx.storefront()?;
    let page = load_page(&storefront, ProductId::new(product), ctx).await?;
    let seller = chosen_seller(&page, selection)?;
    add_to_cart(cart, &page, &selection.selections(), seller, quantity)
}

/// Prompt for a line to remove.
fn pick_line(cart: &CartManager) -> Result<Option<ProductId>> {
    if cart.is_empty() {
        return Ok(None);
    }
    let items: Vec<String> = cart.list().iter().map(describe_line).collect();
    let selection = Select::new()
        .with_prompt("Select an item to remove")
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|i| cart.list()[i].product_id))
}

fn describe_line(line: &artisan_commerce::cart::CartLine) -> String {
    match &line.variant_label {
        Some(label) => format!("{} ({}) x{}", line.title, label, line.quantity),
        None => format!("{} x{}", line.title, line.quantity),
    }
}

fn report(event: &CartEvent, cart: &CartManager, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "event": event.message(),
            "item_count": cart.item_count(),
        }));
        return;
    }
    match event {
        CartEvent::Unchanged => ctx.output.info(&event.message()),
        _ => ctx.output.success(&event.message()),
    }
    ctx.output
        .info(&format!("Cart: {} item(s)", cart.item_count()));
}

fn list_cart(cart: &CartManager, ctx: &Context) -> Result<()> {
    let subtotal = cart.subtotal()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": cart.list(),
            "item_count": cart.item_count(),
            "subtotal": subtotal,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `artisan browse` to find something you like.");
        return Ok(());
    }

    let widths = [5, 30, 16, 22, 5, 10];
    ctx.output.table_row(
        &["ID", "TITLE", "OPTIONS", "SELLER", "QTY", "TOTAL"],
        &widths,
    );
    ctx.output.info(&"-".repeat(98));
    for line in cart.list() {
        let total = line.line_total()?.display();
        ctx.output.table_row(
            &[
                &line.product_id.to_string(),
                &line.title,
                line.variant_label.as_deref().unwrap_or("-"),
                line.shop_name.as_deref().unwrap_or("-"),
                &line.quantity.to_string(),
                &total,
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &subtotal.display());
    Ok(())
}
