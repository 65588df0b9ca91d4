//! End-to-end storefront flow: product page, cart, reload, checkout.

use std::sync::Arc;

use artisan_cache::Cache;
use artisan_commerce::prelude::*;
use artisan_data::{Latency, PageLoader, Repository, Storefront, StoredRepository};

fn storefront() -> Storefront {
    Storefront::seeded(Latency::none()).unwrap()
}

#[tokio::test]
async fn test_browse_to_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let sf = storefront();

    let page = sf.load_product_page(ProductId::new(1)).await.unwrap();
    let emma = page.offer_from("Emma's Pottery Studio").unwrap().clone();
    let selections = Selections::new().with("Color", "Red");
    let display = page.display(&selections, Some(&emma));
    assert_eq!(display.price, Money::from_major(32, Currency::USD));

    {
        let mut cart = CartManager::open_default(Cache::open(dir.path()).unwrap()).unwrap();
        let line = CartLine::from_product(
            &page.product,
            &display,
            &selections,
            emma.shop_name.as_deref(),
            2,
        );
        cart.add_item(line).unwrap();
        cart.add_product(&sf.product(ProductId::new(2)).await.unwrap(), 1)
            .unwrap();
    }

    // A new session sees the same cart.
    let mut cart = CartManager::open_default(Cache::open(dir.path()).unwrap()).unwrap();
    assert_eq!(cart.item_count(), 3);
    let mug = cart.get(ProductId::new(1)).unwrap();
    assert_eq!(mug.variant_label.as_deref(), Some("Red"));
    assert_eq!(mug.shop_name.as_deref(), Some("Emma's Pottery Studio"));
    assert_eq!(cart.subtotal().unwrap(), Money::from_major(162, Currency::USD));

    let orders = sf.checkout(&mut cart, CustomerId::new(42)).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].total, Money::from_major(64, Currency::USD));
    assert_eq!(orders[1].total, Money::from_major(98, Currency::USD));

    let reopened = CartManager::open_default(Cache::open(dir.path()).unwrap()).unwrap();
    assert!(reopened.is_empty());
    assert!(!Cache::open(dir.path()).unwrap().exists(reopened.key()).unwrap());
}

#[tokio::test]
async fn test_orders_persist_in_store() {
    let dir = tempfile::tempdir().unwrap();
    let open_orders = || {
        Arc::new(
            StoredRepository::<Order>::new(Cache::open(dir.path()).unwrap(), "orders")
                .latency(Latency::none()),
        )
    };

    let sf = storefront().with_orders(open_orders());
    let mut cart = CartManager::open(Cache::in_memory(), "guest").unwrap();
    cart.add_product(&sf.product(ProductId::new(3)).await.unwrap(), 1)
        .unwrap();
    let placed = sf.checkout(&mut cart, CustomerId::new(5)).await.unwrap();
    assert_eq!(placed.len(), 1);

    let orders = open_orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_id, CustomerId::new(5));
    assert_eq!(orders[0].status, OrderStatus::New);
}

#[tokio::test(start_paused = true)]
async fn test_latest_page_wins() {
    let loader = PageLoader::new(Arc::new(Storefront::seeded(Latency::default()).unwrap()));

    let (a, b, c) = tokio::join!(
        loader.load(ProductId::new(4)),
        loader.load(ProductId::new(1)),
        loader.load(ProductId::new(2)),
    );
    assert!(a.unwrap().is_none());
    assert!(b.unwrap().is_none());
    assert!(c.unwrap().is_some());

    let current = loader.current().await.unwrap();
    assert_eq!(current.product.id, ProductId::new(2));
    assert_eq!(current.shop.name, "Sarah's Textile Art");
}
