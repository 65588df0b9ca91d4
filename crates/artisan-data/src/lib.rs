//! Data layer for the Artisan storefront.
//!
//! Everything the storefront reads or writes goes through the async
//! [`Repository`] trait. The bundled implementation, [`MockRepository`],
//! serves fixture data from memory behind a simulated network delay;
//! [`StoredRepository`] keeps seller-created records in a [`Cache`].
//!
//! [`Storefront`] wraps one repository per collection and exposes the
//! queries the pages need: product pages with offers and reviews, browse
//! and search, shop management, reviews moderation and checkout.
//!
//! [`Cache`]: artisan_cache::Cache
//!
//! # Example
//!
//! ```rust
//! use artisan_data::{Latency, Storefront};
//! use artisan_commerce::prelude::*;
//!
//! # tokio_test_block(async {
//! let storefront = Storefront::seeded(Latency::none()).unwrap();
//! let page = storefront.load_product_page(ProductId::new(1)).await.unwrap();
//!
//! let selections = Selections::new().with("Color", "Red");
//! let display = page.display(&selections, None);
//! assert!(display.in_stock);
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .enable_time()
//! #         .build()
//! #         .unwrap()
//! #         .block_on(f)
//! # }
//! ```

mod checkout;
mod error;
mod latency;
mod memory;
mod repository;
mod stored;

pub mod page;
pub mod seed;
pub mod sequence;
pub mod storefront;

pub use error::RepoError;
pub use latency::{Latency, Op};
pub use memory::MockRepository;
pub use page::{PageLoader, ProductPage};
pub use repository::{Record, Repository};
pub use seed::{Fixtures, SELLER_PRODUCT_ID_BASE};
pub use sequence::{LoadSequencer, Ticket};
pub use storefront::{Repositories, Storefront};
pub use stored::StoredRepository;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Latency, LoadSequencer, MockRepository, PageLoader, ProductPage, RepoError, Repositories,
        Repository, Storefront, StoredRepository,
    };
}
