//! The per-entity use-case set.

use tracing::{debug, instrument};

use super::{UseCaseError, UseCaseResult};
use crate::db::{Entity, Filter, Patch, Repository};

/// Count, get-one, get-all, create, update and delete for one entity type.
pub struct UseCases<T: Entity> {
    repository: Repository<T>,
}

impl<T: Entity> UseCases<T> {
    pub fn new(repository: Repository<T>) -> Self {
        Self { repository }
    }

    /// Number of records matching `filter`.
    #[instrument(skip(self), fields(entity = T::KIND))]
    pub async fn count(&self, filter: &Filter) -> UseCaseResult<u64> {
        Ok(self.repository.count(filter).await?)
    }

    /// Every record in the collection.
    #[instrument(skip(self), fields(entity = T::KIND))]
    pub async fn get_all(&self) -> UseCaseResult<Vec<T>> {
        Ok(self.repository.find(&Filter::all()).await?)
    }

    /// The record with `id`, or `NotFound`.
    #[instrument(skip(self), fields(entity = T::KIND))]
    pub async fn get_one(&self, id: &str) -> UseCaseResult<T> {
        self.ensure_exists(id).await?;
        // The record can vanish between the probe and the read.
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Insert `item` unless its name is already taken.
    #[instrument(skip(self, item), fields(entity = T::KIND, name = item.name()))]
    pub async fn create(&self, item: &T) -> UseCaseResult<()> {
        if self.repository.count(&Filter::by_name(item.name())).await? > 0 {
            debug!("name already taken");
            return Err(UseCaseError::AlreadyExists {
                entity: T::KIND,
                name: item.name().to_string(),
            });
        }
        Ok(self.repository.create(item).await?)
    }

    /// Overwrite the fields in `data` on an existing record.
    #[instrument(skip(self, data), fields(entity = T::KIND))]
    pub async fn update(&self, id: &str, data: &Patch) -> UseCaseResult<()> {
        self.ensure_exists(id).await?;
        Ok(self.repository.update(id, data).await?)
    }

    /// Remove an existing record.
    #[instrument(skip(self), fields(entity = T::KIND))]
    pub async fn delete(&self, id: &str) -> UseCaseResult<()> {
        self.ensure_exists(id).await?;
        Ok(self.repository.remove(id).await?)
    }

    async fn ensure_exists(&self, id: &str) -> UseCaseResult<()> {
        if self.repository.count(&Filter::by_id(id)).await? == 0 {
            debug!(id, "no such record");
            return Err(not_found::<T>(id));
        }
        Ok(())
    }
}

fn not_found<T: Entity>(id: &str) -> UseCaseError {
    UseCaseError::NotFound {
        entity: T::KIND,
        id: id.to_string(),
    }
}
