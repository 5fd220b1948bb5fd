//! The uniform CRUD contract every storage technology is adapted to.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::db::{DbResult, Entity, Filter, Patch};

/// Adapter binding one concrete store to the six CRUD operations.
///
/// Each call is exactly one store round-trip. Implementations never retry
/// and never translate faults: whatever the store reports is returned as a
/// [`DbError`](crate::db::DbError). Absence is not a fault.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DataSource<T: Entity>: Send + Sync {
    /// Number of records matching `filter`.
    async fn count(&self, filter: &Filter) -> DbResult<u64>;

    /// All records matching `filter`, in store-native order.
    async fn find(&self, filter: &Filter) -> DbResult<Vec<T>>;

    /// The record with the given id, if any.
    async fn find_by_id(&self, id: &str) -> DbResult<Option<T>>;

    /// Insert one record. The store assigns the id.
    async fn create(&self, item: &T) -> DbResult<()>;

    /// Delete by id. Deleting an absent record is a no-op.
    async fn remove(&self, id: &str) -> DbResult<()>;

    /// Overwrite the fields present in `data`. Updating an absent record is a no-op.
    async fn update(&self, id: &str, data: &Patch) -> DbResult<()>;
}
