//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use artisan_cache::Cache;
use artisan_commerce::cart::CartManager;
use artisan_commerce::checkout::Order;
use artisan_data::{Storefront, StoredRepository};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Cache key holding placed orders.
const ORDERS_KEY: &str = "orders";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory holding the cart and orders.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the storage directory as a cache.
    pub fn cache(&self) -> Result<Cache> {
        let dir = self.storage_dir();
        tracing::debug!(dir = %dir.display(), "opening storage");
        Cache::open(dir.clone()).with_context(|| format!("Failed to open storage: {}", dir.display()))
    }

    /// Open the configured cart session.
    pub fn cart(&self) -> Result<CartManager> {
        CartManager::open(self.cache()?, &self.config.storage.cart_key)
            .context("Failed to open cart")
    }

    /// Seeded storefront whose orders are kept in storage.
    pub fn storefront(&self) -> Result<Storefront> {
        let latency = self.config.latency.to_latency();
        let orders = StoredRepository::<Order>::new(self.cache()?, ORDERS_KEY).latency(latency);
        let storefront = Storefront::seeded(latency)
            .context("Failed to load catalog")?
            .with_orders(Arc::new(orders));
        Ok(storefront)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or one of its parents.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    })
}
