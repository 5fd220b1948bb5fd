//! Repository: the seam use-cases depend on.
//!
//! A repository exposes exactly the [`DataSource`] surface and delegates
//! every call unchanged. Swapping the store means writing a new data source;
//! nothing above this layer changes.

use std::sync::Arc;

use crate::db::{DataSource, DbResult, Entity, Filter, Patch};

/// Use-case facing delegate over a [`DataSource`].
pub struct Repository<T: Entity> {
    source: Arc<dyn DataSource<T>>,
}

// Manual Clone impl - only the Arc needs cloning, not T
impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self { source }
    }

    pub async fn count(&self, filter: &Filter) -> DbResult<u64> {
        self.source.count(filter).await
    }

    pub async fn find(&self, filter: &Filter) -> DbResult<Vec<T>> {
        self.source.find(filter).await
    }

    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<T>> {
        self.source.find_by_id(id).await
    }

    pub async fn create(&self, item: &T) -> DbResult<()> {
        self.source.create(item).await
    }

    pub async fn remove(&self, id: &str) -> DbResult<()> {
        self.source.remove(id).await
    }

    pub async fn update(&self, id: &str, data: &Patch) -> DbResult<()> {
        self.source.update(id, data).await
    }
}
