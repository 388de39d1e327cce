//! Record storage: one table per entity, addressed by a server-assigned key.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::entity::Entity;
use crate::error::AppError;
use crate::filter::Predicate;
use crate::service::Fields;
use async_trait::async_trait;

/// Single-record operations. Each call is atomic; concurrent updates of one key
/// are last-write-wins.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    /// Insert a complete field set. Returns the record with key and timestamps.
    async fn insert(&self, fields: &Fields) -> Result<E, AppError>;

    async fn get(&self, id: i64) -> Result<Option<E>, AppError>;

    /// Records satisfying the predicate, in key (insertion) order.
    async fn list(&self, predicate: &Predicate) -> Result<Vec<E>, AppError>;

    /// Replace the supplied fields and advance `updated_at`. `None` if no such key.
    async fn update(&self, id: i64, fields: &Fields) -> Result<Option<E>, AppError>;

    /// Remove by key, returning the removed record.
    async fn delete(&self, id: i64) -> Result<Option<E>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
