use crate::catalog::Product;
use crate::resolve::Selections;

/// Image for the current selections.
///
/// Scans selected values in selection order and returns the first one with an
/// entry in `product.variant_images`; otherwise the primary image. Returns an
/// empty string only for a product without images.
pub fn resolve_image<'a>(product: &'a Product, selections: &Selections) -> &'a str {
    selections
        .values()
        .find_map(|value| product.variant_images.get(value))
        .map(String::as_str)
        .or_else(|| product.primary_image())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductId, ShopId};
    use crate::money::{Currency, Money};

    fn product() -> Product {
        let mut p = Product::new(
            ProductId::new(1),
            ShopId::new(1),
            "Mug",
            Money::from_major(28, Currency::USD),
            10,
        );
        p.images = vec!["https://img/mug.jpg".into(), "https://img/mug-2.jpg".into()];
        p.variant_images.insert("Red".into(), "https://img/mug-red.jpg".into());
        p.variant_images.insert("Large".into(), "https://img/mug-large.jpg".into());
        p
    }

    #[test]
    fn test_falls_back_to_primary_image() {
        let p = product();
        assert_eq!(resolve_image(&p, &Selections::new()), "https://img/mug.jpg");
        let s = Selections::new().with("Color", "Green");
        assert_eq!(resolve_image(&p, &s), "https://img/mug.jpg");
    }

    #[test]
    fn test_first_selected_value_with_image() {
        let p = product();
        let s = Selections::new().with("Size", "Large").with("Color", "Red");
        assert_eq!(resolve_image(&p, &s), "https://img/mug-large.jpg");

        let s = Selections::new().with("Size", "Small").with("Color", "Red");
        assert_eq!(resolve_image(&p, &s), "https://img/mug-red.jpg");
    }

    #[test]
    fn test_no_images() {
        let mut p = product();
        p.images.clear();
        p.variant_images.clear();
        assert_eq!(resolve_image(&p, &Selections::new()), "");
    }
}
