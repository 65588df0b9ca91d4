//! Product detail page.

use anyhow::{anyhow, bail, Result};
use artisan_commerce::cart::{CartEvent, CartLine, CartManager};
use artisan_commerce::catalog::SellerOffer;
use artisan_commerce::ids::ProductId;
use artisan_commerce::resolve::{option_price_delta, DisplayValues, Selections};
use artisan_data::{ProductPage, Storefront};
use console::style;

use super::{ProductArgs, SelectionArgs};
use crate::context::Context;
use crate::output::{format_timestamp, stars, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let page = load_page(&storefront, ProductId::new(args.id), ctx).await?;
    let selections = args.selection.selections();
    let seller = chosen_seller(&page, &args.selection)?;
    let display = page.display(&selections, seller);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": page.product,
            "shop": page.shop,
            "offers": page.offers,
            "reviews": page.reviews,
            "display": display,
        }));
    } else {
        print_page(&page, &selections, seller, &display, ctx);
    }

    if let Some(quantity) = args.add {
        let mut cart = ctx.cart()?;
        let event = add_to_cart(&mut cart, &page, &selections, seller, quantity)?;
        ctx.output.success(&event.message());
    }

    Ok(())
}

/// Fetch a product page behind a spinner.
pub(crate) async fn load_page(
    storefront: &Storefront,
    id: ProductId,
    ctx: &Context,
) -> Result<ProductPage> {
    let page = ctx
        .output
        .waiting("Loading product", storefront.load_product_page(id))
        .await?;
    Ok(page)
}

/// The offer named by `--seller`, else the page's default seller.
pub(crate) fn chosen_seller<'a>(
    page: &'a ProductPage,
    args: &SelectionArgs,
) -> Result<Option<&'a SellerOffer>> {
    match args.seller.as_deref() {
        None => Ok(page.default_seller.as_ref()),
        Some(name) => page.offer_from(name).map(Some).ok_or_else(|| {
            let shops: Vec<String> = page.offers.iter().map(SellerOffer::display_name).collect();
            anyhow!(
                "No offer from '{}'. Available: {}",
                name,
                if shops.is_empty() { "none".to_string() } else { shops.join(", ") }
            )
        }),
    }
}

/// Check that every selection names an existing variant option.
pub(crate) fn validate_selections(page: &ProductPage, selections: &Selections) -> Result<()> {
    for (dimension, value) in selections.iter() {
        let variant = page
            .product
            .variant(dimension)
            .ok_or_else(|| anyhow!("'{}' has no {} option", page.product.title, dimension))?;
        if variant.option(value).is_none() {
            let values: Vec<&str> = variant.options.iter().map(|o| o.value.as_str()).collect();
            bail!(
                "Unknown {}: {}. Available: {}",
                dimension,
                value,
                values.join(", ")
            );
        }
    }
    Ok(())
}

/// Add the resolved product to the cart, bought from `seller` if given.
pub(crate) fn add_to_cart(
    cart: &mut CartManager,
    page: &ProductPage,
    selections: &Selections,
    seller: Option<&SellerOffer>,
    quantity: i64,
) -> Result<CartEvent> {
    validate_selections(page, selections)?;
    let display = page.display(selections, seller);
    if !display.in_stock {
        bail!("'{}' is out of stock for this selection", page.product.title);
    }

    let shop_name = seller.map_or(page.shop.name.clone(), SellerOffer::display_name);
    let mut line = CartLine::from_product(
        &page.product,
        &display,
        selections,
        Some(shop_name.as_str()),
        quantity,
    );
    if let Some(offer) = seller {
        line.shop_id = offer.shop_id;
    }
    if let Some(existing) = cart.get(line.product_id) {
        if existing.shop_id != line.shop_id
            || existing.variant_label != line.variant_label
            || existing.unit_price != line.unit_price
        {
            bail!(
                "'{}' is already in your cart as {}. Remove it first to buy a different option or seller",
                existing.title,
                describe_line(existing)
            );
        }
    }
    Ok(cart.add_item(line)?)
}

fn describe_line(line: &CartLine) -> String {
    let mut parts = Vec::new();
    if let Some(label) = &line.variant_label {
        parts.push(label.clone());
    }
    if let Some(shop) = &line.shop_name {
        parts.push(format!("from {}", shop));
    }
    parts.push(format!("at {}", line.unit_price));
    parts.join(" ")
}

fn print_page(
    page: &ProductPage,
    selections: &Selections,
    seller: Option<&SellerOffer>,
    display: &DisplayValues,
    ctx: &Context,
) {
    let product = &page.product;
    ctx.output.header(&product.title);
    ctx.output.kv("shop", &page.shop.name);
    ctx.output.kv("type", product.product_type.badge_label());
    ctx.output.kv("category", &product.category);
    if let Some(label) = selections.variant_label() {
        ctx.output.kv("selected", &label);
    }
    ctx.output
        .kv("price", &style(display.price.display()).bold().to_string());
    ctx.output.kv("stock", &stock_badge(display.stock));
    if !display.image.is_empty() {
        ctx.output.kv("image", &display.image);
    }
    if let Some(offer) = seller {
        ctx.output.kv("sold by", &offer.display_name());
    }
    ctx.output.blank();
    ctx.output.info(&product.description);

    for variant in &product.variants {
        ctx.output.blank();
        ctx.output.info(&format!("{}:", variant.name));
        for option in &variant.options {
            let mut item = option.value.clone();
            if let Some(delta) = option_price_delta(option, &product.base_price) {
                item.push_str(&format!(" ({})", delta));
            }
            if selections.get(&variant.name) == Some(option.value.as_str()) {
                item = style(item).bold().to_string();
            }
            ctx.output.list_item(&item);
        }
    }

    if !page.offers.is_empty() {
        ctx.output.blank();
        ctx.output.info(&format!("Sellers ({}):", page.offers.len()));
        let widths = [28, 10, 10, 8, 12];
        ctx.output
            .table_row(&["SHOP", "PRICE", "SHIPPING", "DAYS", "RATING"], &widths);
        for offer in &page.offers {
            let shipping = if offer.has_free_shipping() {
                "Free".to_string()
            } else {
                offer.shipping_cost.display()
            };
            let mut name = offer.display_name();
            if offer.priority_fulfillment {
                name.push_str(" ⚡");
            }
            ctx.output.table_row(
                &[
                    &name,
                    &offer.price.display(),
                    &shipping,
                    &offer.delivery_days.to_string(),
                    &format!("{}% ({})", offer.positive_rating_pct, offer.rating_count),
                ],
                &widths,
            );
        }
    }

    ctx.output.blank();
    match page.average_rating() {
        Some(avg) => ctx
            .output
            .info(&format!("Reviews: {:.1} / 5 ({})", avg, page.reviews.len())),
        None => ctx.output.info("No reviews yet."),
    }
    for review in &page.reviews {
        ctx.output.list_item(&format!(
            "{} {} ({})",
            stars(review.rating),
            review.text,
            format_timestamp(review.created_at)
        ));
    }
}
