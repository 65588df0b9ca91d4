//! In-memory repository with simulated latency.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::latency::{Latency, Op};
use crate::repository::{next_id, Record, Repository};
use crate::RepoError;

/// A `Vec<T>` behind a lock, standing in for a remote API.
///
/// Every call first waits for the configured [`Latency`]. New records get
/// the highest existing id plus one, and never an id at or below `id_base`.
#[derive(Debug)]
pub struct MockRepository<T> {
    records: RwLock<Vec<T>>,
    latency: Latency,
    id_base: u64,
}

impl<T: Record> MockRepository<T> {
    /// Empty repository with default latency.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            latency: Latency::default(),
            id_base: 0,
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

    /// Number of stored records, without simulated latency.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl<T: Record + DeserializeOwned> MockRepository<T> {
    /// Seed from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, RepoError> {
        let records: Vec<T> = serde_json::from_str(json)
            .map_err(|e| RepoError::Fixture(format!("{}: {}", T::KIND, e)))?;
        Ok(Self::with_records(records))
    }
}

impl<T: Record> Default for MockRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MockRepository<T> {
    async fn get(&self, id: T::Id) -> Result<T, RepoError> {
        self.latency.wait(Op::Lookup).await;
        tracing::debug!(kind = T::KIND, %id, "get");
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| RepoError::not_found(T::KIND, id))
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        self.latency.wait(Op::List).await;
        tracing::debug!(kind = T::KIND, "list");
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Sync)) -> Result<Vec<T>, RepoError> {
        self.latency.wait(Op::Search).await;
        tracing::debug!(kind = T::KIND, "find");
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    async fn create(&self, mut record: T) -> Result<T, RepoError> {
        self.latency.wait(Op::Write).await;
        let mut records = self.records.write().await;
        let id = next_id(records.iter().map(|r| r.id().into()), self.id_base);
        record.set_id(T::Id::from(id));
        records.push(record.clone());
        tracing::debug!(kind = T::KIND, id, "created");
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, RepoError> {
        self.latency.wait(Op::Write).await;
        let mut records = self.records.write().await;
        let id = record.id();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RepoError::not_found(T::KIND, id))?;
        *slot = record.clone();
        tracing::debug!(kind = T::KIND, %id, "updated");
        Ok(record)
    }

    async fn delete(&self, id: T::Id) -> Result<(), RepoError> {
        self.latency.wait(Op::Write).await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RepoError::not_found(T::KIND, id))?;
        records.remove(index);
        tracing::debug!(kind = T::KIND, %id, "deleted");
        Ok(())
    }
}
