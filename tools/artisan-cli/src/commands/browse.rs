//! Product listing and search.

use anyhow::{anyhow, Result};
use artisan_commerce::catalog::{Product, ProductType};
use artisan_commerce::money::{Currency, Money};
use artisan_commerce::search::{BrowseFilter, SortOption};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let sort: SortOption = args.sort.parse()?;
    let filter = build_filter(&args)?;
    let storefront = ctx.storefront()?;

    let products = match args.query.as_deref() {
        Some(query) => {
            let found = ctx
                .output
                .waiting(&format!("Searching for \"{}\"", query), storefront.search(query))
                .await?;
            artisan_commerce::search::browse(&found, &filter, sort)
        }
        None => {
            ctx.output
                .waiting("Loading products", storefront.browse(&filter, sort))
                .await?
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", sort.as_str()));
    if products.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    print_table(&products, ctx);
    ctx.output.blank();
    ctx.output.info(&format!("Total: {} product(s)", products.len()));
    ctx.output
        .info("Run `artisan product <ID>` for details and variant pricing.");

    Ok(())
}

fn build_filter(args: &BrowseArgs) -> Result<BrowseFilter> {
    let mut filter = BrowseFilter::new();
    if let Some(ref max) = args.max_price {
        let max = Money::parse_decimal(max, Currency::USD)
            .ok_or_else(|| anyhow!("Invalid price: {}", max))?;
        filter = filter.max_price(max);
    }
    for category in &args.category {
        filter = filter.category(category.as_str());
    }
    if let Some(ref kind) = args.product_type {
        let kind: ProductType = kind.parse()?;
        filter = filter.product_type(kind);
    }
    Ok(filter)
}

fn print_table(products: &[Product], ctx: &Context) {
    let widths = [5, 36, 12, 10, 16];
    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &widths);
    ctx.output.info(&"-".repeat(86));

    for product in products {
        let id = product.id.to_string();
        let price = product.base_price.display();
        let stock = stock_badge(product.inventory);
        ctx.output.table_row(
            &[&id, &product.title, &product.category, &price, &stock],
            &widths,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BrowseArgs {
        BrowseArgs {
            query: None,
            category: Vec::new(),
            max_price: None,
            product_type: None,
            sort: "newest".into(),
        }
    }

    #[test]
    fn test_build_filter() {
        let mut a = args();
        a.max_price = Some("$50".into());
        a.category = vec!["Pottery".into()];
        a.product_type = Some("digital".into());
        assert_eq!(
            build_filter(&a).unwrap(),
            BrowseFilter::new()
                .max_price(Money::from_major(50, Currency::USD))
                .category("Pottery")
                .product_type(ProductType::Digital)
        );
    }

    #[test]
    fn test_build_filter_rejects_bad_input() {
        let mut a = args();
        a.max_price = Some("cheap".into());
        assert!(build_filter(&a).is_err());

        let mut a = args();
        a.product_type = Some("vintage".into());
        assert!(build_filter(&a).is_err());
    }
}
