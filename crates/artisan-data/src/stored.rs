//! Repository persisted in a [`Cache`].
//!
//! Used for data the seller creates locally (shops, listings, orders) so it
//! survives between sessions. The whole collection lives under one key.

use std::marker::PhantomData;

use artisan_cache::Cache;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::latency::{Latency, Op};
use crate::repository::{next_id, Record, Repository};
use crate::RepoError;

/// A collection stored as one JSON array in a cache.
#[derive(Debug)]
pub struct StoredRepository<T> {
    cache: Cache,
    key: String,
    latency: Latency,
    id_base: u64,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> StoredRepository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            latency: Latency::default(),
            id_base: 0,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Assign new ids above `base`.
    pub fn id_base(mut self, base: u64) -> Self {
        self.id_base = base;
        self
    }

    fn load(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.cache.get::<Vec<T>>(&self.key)?.unwrap_or_default())
    }

    fn save(&self, records: &[T]) -> Result<(), RepoError> {
        self.cache.set(&self.key, records)?;
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for StoredRepository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn get(&self, id: T::Id) -> Result<T, RepoError> {
        self.latency.wait(Op::Lookup).await;
        self.load()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| RepoError::not_found(T::KIND, id))
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        self.latency.wait(Op::List).await;
        self.load()
    }

    async fn create(&self, mut record: T) -> Result<T, RepoError> {
        self.latency.wait(Op::Write).await;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load()?;
        let id = next_id(records.iter().map(|r| r.id().into()), self.id_base);
        record.set_id(T::Id::from(id));
        records.push(record.clone());
        self.save(&records)?;
        tracing::debug!(kind = T::KIND, key = %self.key, id, "stored");
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, RepoError> {
        self.latency.wait(Op::Write).await;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load()?;
        let id = record.id();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RepoError::not_found(T::KIND, id))?;
        *slot = record.clone();
        self.save(&records)?;
        Ok(record)
    }

    async fn delete(&self, id: T::Id) -> Result<(), RepoError> {
        self.latency.wait(Op::Write).await;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(RepoError::not_found(T::KIND, id));
        }
        self.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_commerce::catalog::Shop;
    use artisan_commerce::ids::{SellerId, ShopId};

    fn shop(name: &str) -> Shop {
        Shop::new(ShopId::new(0), SellerId::new(100), name, name.to_lowercase())
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let repo = StoredRepository::<Shop>::new(Cache::open(dir.path()).unwrap(), "seller:shops")
                .latency(Latency::none());
            let created = repo.create(shop("Clayworks")).await.unwrap();
            assert_eq!(created.id, ShopId::new(1));
        }

        let repo = StoredRepository::<Shop>::new(Cache::open(dir.path()).unwrap(), "seller:shops")
            .latency(Latency::none());
        let shops = repo.list().await.unwrap();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Clayworks");
    }

    #[tokio::test]
    async fn test_find_uses_default_filter() {
        let repo = StoredRepository::<Shop>::new(Cache::in_memory(), "seller:shops")
            .latency(Latency::none());
        repo.create(shop("Clayworks")).await.unwrap();
        repo.create(shop("Loomhouse")).await.unwrap();

        let found = repo.find(&|s: &Shop| s.slug == "loomhouse").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Loomhouse");
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let repo = StoredRepository::<Shop>::new(Cache::in_memory(), "seller:shops")
            .latency(Latency::none());
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(ShopId::new(3)).await,
            Err(RepoError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_storage_error() {
        let cache = Cache::in_memory();
        cache.set_raw("seller:shops", b"nope").unwrap();
        let repo = StoredRepository::<Shop>::new(cache, "seller:shops").latency(Latency::none());
        assert!(matches!(repo.list().await, Err(RepoError::Storage(_))));
    }
}
