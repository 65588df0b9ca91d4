use crate::catalog::SellerOffer;

/// Offer to preselect on the product page.
///
/// The first priority-fulfillment offer, otherwise the cheapest offer with
/// ties going to the earliest. `None` for an empty list.
pub fn select_default_seller(sellers: &[SellerOffer]) -> Option<&SellerOffer> {
    sellers
        .iter()
        .find(|s| s.priority_fulfillment)
        .or_else(|| sellers.iter().min_by_key(|s| s.price.amount_cents))
}
