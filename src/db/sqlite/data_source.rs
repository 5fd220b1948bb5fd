//! SQLite DataSource implementation.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::instrument;

use super::SqliteStore;
use super::helpers::push_filter;
use crate::db::models::{from_document, to_document};
use crate::db::{DataSource, DbResult, Entity, Filter, Patch};

/// SQLx-backed data source over the table named by `T::COLLECTION`.
pub struct SqliteDataSource<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteDataSource<T> {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
            _entity: PhantomData,
        }
    }

    fn table() -> String {
        format!("\"{}\"", T::COLLECTION)
    }

    fn decode(row: SqliteRow) -> DbResult<T> {
        let id: i64 = row.try_get("id")?;
        let doc: String = row.try_get("doc")?;
        let doc: Map<String, Value> = serde_json::from_str(&doc)?;
        from_document(id.to_string(), doc)
    }
}

#[async_trait]
impl<T: Entity> DataSource<T> for SqliteDataSource<T> {
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn count(&self, filter: &Filter) -> DbResult<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", Self::table()));
        push_filter(&mut qb, filter);

        let total: i64 = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total as u64)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find(&self, filter: &Filter) -> DbResult<Vec<T>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT id, doc FROM {}", Self::table()));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::decode).collect()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_id(&self, id: &str) -> DbResult<Option<T>> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = ?", Self::table());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::decode).transpose()
    }

    #[instrument(skip(self, item), fields(collection = T::COLLECTION))]
    async fn create(&self, item: &T) -> DbResult<()> {
        let doc = serde_json::to_string(&to_document(item)?)?;
        let sql = format!("INSERT INTO {} (doc) VALUES (?)", Self::table());
        sqlx::query(&sql).bind(doc).execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn remove(&self, id: &str) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", Self::table());
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self, data), fields(collection = T::COLLECTION))]
    async fn update(&self, id: &str, data: &Patch) -> DbResult<()> {
        let mut patch = data.clone();
        patch.remove("id");

        // Merge-patch in a single statement; no row matched is a no-op.
        let sql = format!(
            "UPDATE {} SET doc = json_patch(doc, ?) WHERE id = ?",
            Self::table()
        );
        sqlx::query(&sql)
            .bind(Value::Object(patch).to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
