use crate::catalog::{Product, SellerOffer, COLOR_KEY, SIZE_KEY};
use crate::resolve::Selections;

/// Effective stock for the current selections and seller.
///
/// Precedence, highest first:
/// 1. With a variant matrix and both `Color` and `Size` selected, the stock of
///    the matching matrix entry. A combination missing from the matrix falls
///    through to the seller or product stock.
/// 2. The stock of the first variant option (in variant order) that is
///    selected and has a stock count.
/// 3. The selected seller's stock, else `product.inventory`.
pub fn resolve_stock(
    product: &Product,
    selections: &Selections,
    seller: Option<&SellerOffer>,
) -> i64 {
    let fallback = seller.map_or(product.inventory, |s| s.stock);

    if let Some(matrix) = &product.variant_matrix {
        if let (Some(color), Some(size)) = (selections.get(COLOR_KEY), selections.get(SIZE_KEY)) {
            return matrix.find(color, size).map_or(fallback, |e| e.stock);
        }
    }

    product
        .variants
        .iter()
        .find_map(|variant| {
            selections
                .get(&variant.name)
                .and_then(|value| variant.option(value))
                .and_then(|option| option.stock)
        })
        .unwrap_or(fallback)
}

/// Human-readable stock status.
pub fn stock_label(stock: i64) -> String {
    if stock > 0 {
        format!("{} available", stock)
    } else {
        "Out of stock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MatrixEntry, Variant, VariantMatrix, VariantOption};
    use crate::ids::{OfferId, ProductId, ShopId};
    use crate::money::{Currency, Money};

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    fn product() -> Product {
        let mut p = Product::new(ProductId::new(1), ShopId::new(1), "Tee", usd(30), 20);
        p.variants = vec![
            Variant::new(
                "Color",
                vec![
                    VariantOption::new("Red").with_stock(6),
                    VariantOption::new("Blue"),
                ],
            ),
            Variant::new("Size", vec![VariantOption::new("M").with_stock(3)]),
        ];
        p
    }

    fn offer(stock: i64) -> SellerOffer {
        SellerOffer {
            id: OfferId::new(1),
            product_id: ProductId::new(1),
            shop_id: ShopId::new(2),
            shop_name: None,
            price: usd(25),
            stock,
            priority_fulfillment: false,
            shipping_cost: usd(0),
            delivery_days: 3,
            positive_rating_pct: 98,
            rating_count: 10,
        }
    }

    #[test]
    fn test_matrix_is_authoritative() {
        let mut p = product();
        p.variant_matrix = Some(VariantMatrix::new(vec![MatrixEntry::new("Red", "M", usd(30), 0)]));
        let s = Selections::new().with("Color", "Red").with("Size", "M");
        assert_eq!(resolve_stock(&p, &s, None), 0);
    }

    #[test]
    fn test_matrix_miss_falls_back_to_seller_or_inventory() {
        let mut p = product();
        p.variant_matrix = Some(VariantMatrix::new(vec![MatrixEntry::new("Red", "M", usd(30), 0)]));
        let s = Selections::new().with("Color", "Blue").with("Size", "M");
        assert_eq!(resolve_stock(&p, &s, None), 20);
        assert_eq!(resolve_stock(&p, &s, Some(&offer(7))), 7);
    }

    #[test]
    fn test_partial_matrix_selection_uses_options() {
        let mut p = product();
        p.variant_matrix = Some(VariantMatrix::new(vec![MatrixEntry::new("Red", "M", usd(30), 0)]));
        let s = Selections::new().with("Color", "Red");
        assert_eq!(resolve_stock(&p, &s, None), 6);
    }

    #[test]
    fn test_first_stocked_option_wins() {
        let p = product();
        let s = Selections::new().with("Size", "M").with("Color", "Red");
        assert_eq!(resolve_stock(&p, &s, None), 6);

        let s = Selections::new().with("Color", "Blue").with("Size", "M");
        assert_eq!(resolve_stock(&p, &s, None), 3);
    }

    #[test]
    fn test_seller_then_inventory() {
        let p = product();
        assert_eq!(resolve_stock(&p, &Selections::new(), None), 20);
        assert_eq!(resolve_stock(&p, &Selections::new(), Some(&offer(4))), 4);
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(3), "3 available");
        assert_eq!(stock_label(0), "Out of stock");
    }
}
