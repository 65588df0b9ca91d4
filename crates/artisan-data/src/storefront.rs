//! Storefront queries over the injected repositories.

use std::sync::Arc;

use artisan_commerce::catalog::{Category, Product, Review, ReviewStatus, SellerOffer, Shop};
use artisan_commerce::checkout::{Order, OrderStatus};
use artisan_commerce::ids::{CustomerId, OrderId, ProductId, ReviewId, SellerId, ShopId};
use artisan_commerce::search::{browse, matches_query, BrowseFilter, SortOption};
use artisan_commerce::seller::{DashboardStats, ProductDraft, ShopDraft};

use crate::latency::Latency;
use crate::repository::Repository;
use crate::seed::Fixtures;
use crate::RepoError;

/// One repository per collection.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn Repository<Product>>,
    pub shops: Arc<dyn Repository<Shop>>,
    pub offers: Arc<dyn Repository<SellerOffer>>,
    pub reviews: Arc<dyn Repository<Review>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub orders: Arc<dyn Repository<Order>>,
}

/// Read and write access to the marketplace.
///
/// Cloning is cheap; clones share the repositories.
#[derive(Clone)]
pub struct Storefront {
    pub(crate) repos: Repositories,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront").finish_non_exhaustive()
    }
}

impl Storefront {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Storefront over the bundled sample data.
    pub fn seeded(latency: Latency) -> Result<Self, RepoError> {
        Ok(Self::new(Fixtures::load()?.into_repositories(latency)))
    }

    /// Replace the order repository (e.g., with a persisted one).
    pub fn with_orders(mut self, orders: Arc<dyn Repository<Order>>) -> Self {
        self.repos.orders = orders;
        self
    }

    /// Replace the shop repository.
    pub fn with_shops(mut self, shops: Arc<dyn Repository<Shop>>) -> Self {
        self.repos.shops = shops;
        self
    }

    // Products

    pub async fn all_products(&self) -> Result<Vec<Product>, RepoError> {
        self.repos.products.list().await
    }

    pub async fn product(&self, id: ProductId) -> Result<Product, RepoError> {
        self.repos.products.get(id).await
    }

    pub async fn products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepoError> {
        self.repos.products.find(&|p: &Product| p.shop_id == shop_id).await
    }

    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, RepoError> {
        self.repos
            .products
            .find(&|p: &Product| p.category.eq_ignore_ascii_case(category))
            .await
    }

    pub async fn products_by_seller(&self, seller_id: SellerId) -> Result<Vec<Product>, RepoError> {
        self.repos
            .products
            .find(&|p: &Product| p.seller_id == Some(seller_id))
            .await
    }

    /// Case-insensitive search over title, description and category.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, RepoError> {
        tracing::debug!(query, "search");
        self.repos
            .products
            .find(&|p: &Product| matches_query(p, query))
            .await
    }

    /// Filtered, sorted listing for the browse page.
    pub async fn browse(
        &self,
        filter: &BrowseFilter,
        sort: SortOption,
    ) -> Result<Vec<Product>, RepoError> {
        let products = self.repos.products.list().await?;
        Ok(browse(&products, filter, sort))
    }

    /// Store a seller's new listing.
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        shop_id: ShopId,
        seller_id: SellerId,
    ) -> Result<Product, RepoError> {
        // Placeholder id; the repository assigns the real one.
        let product = draft.into_product(ProductId::new(0), shop_id, seller_id);
        let created = self.repos.products.create(product).await?;
        tracing::info!(product = %created.id, shop = %shop_id, "listing created");
        Ok(created)
    }

    /// Apply an edited draft to an existing listing.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, RepoError> {
        let mut product = self.repos.products.get(id).await?;
        draft.apply_to(&mut product);
        self.repos.products.update(product).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), RepoError> {
        self.repos.products.delete(id).await
    }

    /// Dashboard summary over a seller's listings.
    pub async fn dashboard_stats(&self, seller_id: SellerId) -> Result<DashboardStats, RepoError> {
        let products = self.products_by_seller(seller_id).await?;
        Ok(DashboardStats::for_products(&products))
    }

    // Shops

    pub async fn all_shops(&self) -> Result<Vec<Shop>, RepoError> {
        self.repos.shops.list().await
    }

    pub async fn shop(&self, id: ShopId) -> Result<Shop, RepoError> {
        self.repos.shops.get(id).await
    }

    pub async fn shop_by_slug(&self, slug: &str) -> Result<Option<Shop>, RepoError> {
        let shops = self.repos.shops.find(&|s: &Shop| s.slug == slug).await?;
        Ok(shops.into_iter().next())
    }

    pub async fn shop_by_seller(&self, seller_id: SellerId) -> Result<Option<Shop>, RepoError> {
        let shops = self
            .repos
            .shops
            .find(&|s: &Shop| s.seller_id == seller_id)
            .await?;
        Ok(shops.into_iter().next())
    }

    /// Open a shop for a seller. Slugs are unique and a seller has one shop.
    pub async fn create_shop(&self, draft: ShopDraft, seller_id: SellerId) -> Result<Shop, RepoError> {
        let shops = self.repos.shops.list().await?;
        if shops.iter().any(|s| s.slug == draft.slug) {
            return Err(RepoError::Conflict(format!(
                "shop URL '{}' is already taken",
                draft.slug
            )));
        }
        if shops.iter().any(|s| s.seller_id == seller_id) {
            return Err(RepoError::Conflict(format!(
                "seller {} already has a shop",
                seller_id
            )));
        }
        let created = self
            .repos
            .shops
            .create(draft.into_shop(ShopId::new(0), seller_id))
            .await?;
        tracing::info!(shop = %created.id, slug = %created.slug, "shop created");
        Ok(created)
    }

    // Offers

    /// Offers for a product, joined with shop names.
    ///
    /// Offers whose shop no longer exists are dropped.
    pub async fn seller_offers(&self, product_id: ProductId) -> Result<Vec<SellerOffer>, RepoError> {
        let for_product = |o: &SellerOffer| o.product_id == product_id;
        let (offers, shops) = futures::try_join!(
            self.repos.offers.find(&for_product),
            self.repos.shops.list(),
        )?;

        Ok(offers
            .into_iter()
            .filter_map(|mut offer| {
                let shop = shops.iter().find(|s| s.id == offer.shop_id)?;
                offer.shop_name = Some(shop.name.clone());
                Some(offer)
            })
            .collect())
    }

    // Reviews

    /// Approved reviews of a product.
    pub async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, RepoError> {
        self.repos
            .reviews
            .find(&|r: &Review| r.product_id == product_id && r.is_approved())
            .await
    }

    /// Reviews awaiting moderation.
    pub async fn pending_reviews(&self) -> Result<Vec<Review>, RepoError> {
        self.repos
            .reviews
            .find(&|r: &Review| r.status == ReviewStatus::Pending)
            .await
    }

    /// Submit a review for moderation.
    pub async fn submit_review(
        &self,
        product_id: ProductId,
        customer_id: CustomerId,
        rating: u8,
        text: &str,
    ) -> Result<Review, RepoError> {
        self.repos.products.get(product_id).await?;
        let review = Review::new(ReviewId::new(0), product_id, customer_id, rating, text);
        self.repos.reviews.create(review).await
    }

    pub async fn approve_review(&self, id: ReviewId) -> Result<Review, RepoError> {
        let mut review = self.repos.reviews.get(id).await?;
        review.approve();
        self.repos.reviews.update(review).await
    }

    pub async fn reject_review(&self, id: ReviewId) -> Result<Review, RepoError> {
        let mut review = self.repos.reviews.get(id).await?;
        review.reject();
        self.repos.reviews.update(review).await
    }

    // Categories

    pub async fn categories(&self) -> Result<Vec<Category>, RepoError> {
        self.repos.categories.list().await
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let found = self
            .repos
            .categories
            .find(&|c: &Category| c.slug == slug)
            .await?;
        Ok(found.into_iter().next())
    }

    // Orders

    pub async fn order(&self, id: OrderId) -> Result<Order, RepoError> {
        self.repos.orders.get(id).await
    }

    pub async fn orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, RepoError> {
        self.repos
            .orders
            .find(&|o: &Order| o.customer_id == customer_id)
            .await
    }

    pub async fn orders_by_seller(&self, seller_id: SellerId) -> Result<Vec<Order>, RepoError> {
        self.repos
            .orders
            .find(&|o: &Order| o.seller_id == Some(seller_id))
            .await
    }

    /// Move an order to `status`, stamping shipped and completed times.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepoError> {
        let mut order = self.repos.orders.get(id).await?;
        order.set_status(status)?;
        let order = self.repos.orders.update(order).await?;
        tracing::info!(order = %id, status = status.as_str(), "order status changed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_commerce::seller::{ProductForm, ShopForm};
    use artisan_commerce::Currency;

    fn storefront() -> Storefront {
        Storefront::seeded(Latency::none()).unwrap()
    }

    #[tokio::test]
    async fn test_product_not_found() {
        let err = storefront().product(ProductId::new(404)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { kind: "Product", id: 404 }));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let sf = storefront();
        let found = sf.search("CERAMIC").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(1));

        // Category names match too.
        assert_eq!(sf.search("home decor").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_products_by_shop_and_category() {
        let sf = storefront();
        assert_eq!(sf.products_by_shop(ShopId::new(1)).await.unwrap().len(), 2);
        assert_eq!(sf.products_by_category("jewelry").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seller_offers_joined_and_orphans_dropped() {
        let sf = storefront();
        let offers = sf.seller_offers(ProductId::new(1)).await.unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].shop_name.as_deref(), Some("Emma's Pottery Studio"));

        // The only offer for product 3 points at a missing shop.
        assert!(sf.seller_offers(ProductId::new(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_approved_reviews_listed() {
        let sf = storefront();
        let reviews = sf.reviews(ProductId::new(1)).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(Review::is_approved));
    }

    #[tokio::test]
    async fn test_review_moderation() {
        let sf = storefront();
        let review = sf
            .submit_review(ProductId::new(2), CustomerId::new(7), 5, "Beautiful work")
            .await
            .unwrap();
        assert_eq!(review.status, ReviewStatus::Pending);
        assert_eq!(sf.pending_reviews().await.unwrap().len(), 2);
        assert_eq!(sf.reviews(ProductId::new(2)).await.unwrap().len(), 1);

        sf.approve_review(review.id).await.unwrap();
        assert_eq!(sf.reviews(ProductId::new(2)).await.unwrap().len(), 2);

        assert!(sf
            .submit_review(ProductId::new(404), CustomerId::new(7), 5, "?")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_seller_listing_lifecycle() {
        let sf = storefront();
        let seller = SellerId::new(100);

        let shop_form = ShopForm {
            description: "Hand carved spoons and boards from fallen cherry and walnut.".into(),
            banner_image: "https://img/banner.jpg".into(),
            logo_image: "https://img/logo.jpg".into(),
            ..ShopForm::named("Hollow Oak Woodcraft")
        };
        let shop = sf
            .create_shop(shop_form.validate().unwrap(), seller)
            .await
            .unwrap();
        assert_eq!(sf.shop_by_seller(seller).await.unwrap().unwrap().id, shop.id);
        assert!(sf.shop_by_slug("hollow-oak-woodcraft").await.unwrap().is_some());

        let again = sf.create_shop(shop_form.validate().unwrap(), seller).await;
        assert!(matches!(again, Err(RepoError::Conflict(_))));

        let form = ProductForm {
            title: "Cherry Serving Board".into(),
            description: "Oiled cherry wood".into(),
            base_price: "64".into(),
            category: "Home Decor".into(),
            images: vec!["https://img/board.jpg".into()],
            inventory: "3".into(),
            ..ProductForm::default()
        };
        let created = sf
            .create_product(form.validate(Currency::USD).unwrap(), shop.id, seller)
            .await
            .unwrap();
        assert!(created.id.get() > 1000);

        let stats = sf.dashboard_stats(seller).await.unwrap();
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.low_stock_products, 1);

        sf.delete_product(created.id).await.unwrap();
        assert_eq!(sf.dashboard_stats(seller).await.unwrap().total_products, 0);
    }

    #[tokio::test]
    async fn test_order_status_updates() {
        let sf = storefront();
        let order = sf
            .update_order_status(OrderId::new(2), OrderStatus::Shipped)
            .await
            .unwrap();
        assert!(order.shipped_at.is_some());

        sf.update_order_status(OrderId::new(2), OrderStatus::Cancelled)
            .await
            .unwrap();
        let err = sf
            .update_order_status(OrderId::new(2), OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Commerce(_)));

        assert_eq!(sf.orders_by_seller(SellerId::new(1)).await.unwrap().len(), 1);
        assert_eq!(sf.orders_by_customer(CustomerId::new(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_categories() {
        let sf = storefront();
        assert_eq!(sf.categories().await.unwrap().len(), 5);
        let pottery = sf.category_by_slug("pottery").await.unwrap().unwrap();
        assert_eq!(pottery.name, "Pottery");
        assert!(sf.category_by_slug("candles").await.unwrap().is_none());
    }
}
