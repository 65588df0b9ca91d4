//! Product page loading.

use std::sync::Arc;

use artisan_commerce::catalog::{average_rating, Product, Review, SellerOffer, Shop};
use artisan_commerce::ids::ProductId;
use artisan_commerce::resolve::{resolve_display, select_default_seller, DisplayValues, Selections};
use tokio::sync::Mutex;

use crate::sequence::LoadSequencer;
use crate::storefront::Storefront;
use crate::RepoError;

/// Everything the product detail page needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    /// The product, with `sellers` filled from `offers`.
    pub product: Product,
    pub shop: Shop,
    /// Competing offers joined with shop names.
    pub offers: Vec<SellerOffer>,
    /// Approved reviews only.
    pub reviews: Vec<Review>,
    /// Offer preselected for the buyer.
    pub default_seller: Option<SellerOffer>,
}

impl ProductPage {
    /// Resolve price, stock and image for `selections` and the chosen seller.
    ///
    /// `seller` falls back to the default seller when `None`.
    pub fn display(&self, selections: &Selections, seller: Option<&SellerOffer>) -> DisplayValues {
        let seller = seller.or(self.default_seller.as_ref());
        resolve_display(&self.product, selections, seller)
    }

    /// Look up one of the page's offers by shop.
    pub fn offer_from(&self, shop_name: &str) -> Option<&SellerOffer> {
        self.offers
            .iter()
            .find(|o| o.shop_name.as_deref() == Some(shop_name))
    }

    pub fn average_rating(&self) -> Option<f64> {
        average_rating(&self.reviews)
    }
}

impl Storefront {
    /// Load a product with its shop, offers and approved reviews.
    ///
    /// The product is fetched first; the rest is fetched concurrently.
    pub async fn load_product_page(&self, id: ProductId) -> Result<ProductPage, RepoError> {
        let mut product = self.product(id).await?;
        let (shop, offers, reviews) = futures::try_join!(
            self.shop(product.shop_id),
            self.seller_offers(id),
            self.reviews(id),
        )?;

        let default_seller = select_default_seller(&offers).cloned();
        product.sellers = offers.clone();
        tracing::debug!(
            product = %id,
            offers = offers.len(),
            reviews = reviews.len(),
            "product page loaded"
        );

        Ok(ProductPage {
            product,
            shop,
            offers,
            reviews,
            default_seller,
        })
    }
}

/// Holds the current product page, discarding loads that were superseded
/// before they finished.
#[derive(Debug)]
pub struct PageLoader {
    storefront: Arc<Storefront>,
    sequencer: LoadSequencer,
    current: Mutex<Option<ProductPage>>,
}

impl PageLoader {
    pub fn new(storefront: Arc<Storefront>) -> Self {
        Self {
            storefront,
            sequencer: LoadSequencer::new(),
            current: Mutex::new(None),
        }
    }

    /// Load a page and make it current.
    ///
    /// Returns `Ok(None)` when a newer load started meanwhile; neither the
    /// stale page nor its error is kept.
    pub async fn load(&self, id: ProductId) -> Result<Option<ProductPage>, RepoError> {
        let ticket = self.sequencer.begin();
        let result = self.storefront.load_product_page(id).await;

        // Checked under the lock so a newer load cannot commit in between.
        let mut current = self.current.lock().await;
        let Some(result) = self.sequencer.accept(ticket, result) else {
            return Ok(None);
        };
        let page = result?;
        *current = Some(page.clone());
        Ok(Some(page))
    }

    /// The most recently committed page.
    pub async fn current(&self) -> Option<ProductPage> {
        self.current.lock().await.clone()
    }
}
