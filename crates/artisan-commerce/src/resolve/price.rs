use crate::catalog::{Variant, VariantOption};
use crate::money::Money;
use crate::resolve::Selections;

/// Effective unit price for the current selections.
///
/// Starts from `base` and walks `variants` in order. A selected option with a
/// price replaces the running price outright, so when several dimensions are
/// selected the last priced one wins. Selections that match no option are
/// ignored.
pub fn resolve_price(base: Money, variants: &[Variant], selections: &Selections) -> Money {
    variants.iter().fold(base, |price, variant| {
        selections
            .get(&variant.name)
            .and_then(|value| variant.option(value))
            .and_then(|option| option.price)
            .unwrap_or(price)
    })
}

/// Label for an option's price relative to the base price, e.g. "+$4.00".
pub fn option_price_delta(option: &VariantOption, base: &Money) -> Option<String> {
    option.price.and_then(|price| price.delta_label(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantOption;
    use crate::money::Currency;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    fn color() -> Variant {
        Variant::new(
            "Color",
            vec![
                VariantOption::new("Ocean Blue").with_price(usd(28)),
                VariantOption::new("Red").with_price(usd(32)),
            ],
        )
    }

    fn size() -> Variant {
        Variant::new(
            "Size",
            vec![
                VariantOption::new("Small").with_price(usd(24)),
                VariantOption::new("Large"),
            ],
        )
    }

    #[test]
    fn test_no_variants_returns_base() {
        let s = Selections::new().with("Color", "Red");
        assert_eq!(resolve_price(usd(28), &[], &s), usd(28));
    }

    #[test]
    fn test_selected_option_replaces_base() {
        let variants = [color()];
        let red = Selections::new().with("Color", "Red");
        assert_eq!(resolve_price(usd(28), &variants, &red), usd(32));
        assert_eq!(resolve_price(usd(28), &variants, &Selections::new()), usd(28));
    }

    #[test]
    fn test_unknown_value_ignored() {
        let variants = [color()];
        let s = Selections::new().with("Color", "Green").with("Finish", "Matte");
        assert_eq!(resolve_price(usd(28), &variants, &s), usd(28));
    }

    #[test]
    fn test_later_variant_wins() {
        let variants = [color(), size()];
        // Selection order does not matter, variant order does.
        let s = Selections::new().with("Size", "Small").with("Color", "Red");
        assert_eq!(resolve_price(usd(28), &variants, &s), usd(24));
    }

    #[test]
    fn test_unpriced_option_keeps_running_price() {
        let variants = [color(), size()];
        let s = Selections::new().with("Color", "Red").with("Size", "Large");
        assert_eq!(resolve_price(usd(28), &variants, &s), usd(32));
    }

    #[test]
    fn test_option_price_delta() {
        let v = color();
        let base = usd(28);
        assert_eq!(option_price_delta(v.option("Red").unwrap(), &base).as_deref(), Some("+$4.00"));
        assert_eq!(option_price_delta(v.option("Ocean Blue").unwrap(), &base), None);
    }
}
