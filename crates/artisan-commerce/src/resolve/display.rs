use serde::{Deserialize, Serialize};

use crate::catalog::{Product, SellerOffer, COLOR_KEY, SIZE_KEY};
use crate::money::Money;
use crate::resolve::{resolve_image, resolve_price, resolve_stock, Selections};

/// Everything the product page shows for one selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayValues {
    pub price: Money,
    pub stock: i64,
    pub image: String,
    pub in_stock: bool,
}

/// Resolve price, stock and image together.
///
/// The price starts from the selected seller's price (else the base price).
/// A matrix entry matching both `Color` and `Size` sets it outright;
/// otherwise variant option prices apply as in [`resolve_price`].
pub fn resolve_display(
    product: &Product,
    selections: &Selections,
    seller: Option<&SellerOffer>,
) -> DisplayValues {
    let start = seller.map_or(product.base_price, |s| s.price);

    let matrix_price = product.variant_matrix.as_ref().and_then(|matrix| {
        let color = selections.get(COLOR_KEY)?;
        let size = selections.get(SIZE_KEY)?;
        matrix.find(color, size).map(|e| e.price)
    });
    let price =
        matrix_price.unwrap_or_else(|| resolve_price(start, &product.variants, selections));

    let stock = resolve_stock(product, selections, seller);
    DisplayValues {
        price,
        stock,
        image: resolve_image(product, selections).to_string(),
        in_stock: stock > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MatrixEntry, Variant, VariantMatrix, VariantOption};
    use crate::ids::{OfferId, ProductId, ShopId};
    use crate::money::Currency;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    fn product() -> Product {
        let mut p = Product::new(ProductId::new(9), ShopId::new(1), "Hoodie", usd(40), 8);
        p.images = vec!["https://img/hoodie.jpg".into()];
        p.variants = vec![
            Variant::new(
                "Color",
                vec![
                    VariantOption::new("Red").with_price(usd(42)),
                    VariantOption::new("Grey"),
                ],
            ),
            Variant::new("Size", vec![VariantOption::new("M"), VariantOption::new("L")]),
        ];
        p.variant_matrix = Some(VariantMatrix::new(vec![
            MatrixEntry::new("Red", "M", usd(44), 0),
            MatrixEntry::new("Red", "L", usd(46), 2),
        ]));
        p
    }

    fn offer() -> SellerOffer {
        SellerOffer {
            id: OfferId::new(1),
            product_id: ProductId::new(9),
            shop_id: ShopId::new(3),
            shop_name: Some("Knit Works".into()),
            price: usd(35),
            stock: 11,
            priority_fulfillment: true,
            shipping_cost: usd(5),
            delivery_days: 2,
            positive_rating_pct: 99,
            rating_count: 120,
        }
    }

    #[test]
    fn test_no_selection() {
        let d = resolve_display(&product(), &Selections::new(), None);
        assert_eq!(d.price, usd(40));
        assert_eq!(d.stock, 8);
        assert!(d.in_stock);
        assert_eq!(d.image, "https://img/hoodie.jpg");
    }

    #[test]
    fn test_matrix_sets_price_and_stock() {
        let s = Selections::new().with("Color", "Red").with("Size", "M");
        let d = resolve_display(&product(), &s, Some(&offer()));
        assert_eq!(d.price, usd(44));
        assert_eq!(d.stock, 0);
        assert!(!d.in_stock);
    }

    #[test]
    fn test_seller_price_then_option_override() {
        let p = product();
        let seller = offer();

        let grey = Selections::new().with("Color", "Grey");
        let d = resolve_display(&p, &grey, Some(&seller));
        assert_eq!(d.price, usd(35));
        assert_eq!(d.stock, 11);

        let red = Selections::new().with("Color", "Red");
        assert_eq!(resolve_display(&p, &red, Some(&seller)).price, usd(42));
    }
}
