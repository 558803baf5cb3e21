use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{Record, Repository, StoreError};

/// Records held in a map for the lifetime of the process. Nothing survives a restart.
pub struct InMemoryRepository<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    #[tracing::instrument(name = "Insert a record into the in-memory store", skip(self, record), fields(record_id = %record.id()))]
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = record.id();

        if records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        records.insert(id, record.clone());

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut records: Vec<T> = records.values().cloned().collect();

        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(records)
    }
}
