//! Storage of intake records.
//!
//! Handlers only see the [`Repository`] trait, so the process-lifetime
//! [`InMemoryRepository`] can be swapped for a durable backend without
//! touching the routes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

mod in_memory;

pub use in_memory::InMemoryRepository;

/// Anything a repository can hold: identified by the caller, ordered by creation time.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Stores a record under its own id and returns what was stored.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Every stored record, most recent first.
    async fn list(&self) -> Result<Vec<T>, StoreError>;
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A record with id {0} is already stored.")]
    DuplicateId(Uuid),
    #[error("The store lock was poisoned by a panicking writer.")]
    LockPoisoned,
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}
