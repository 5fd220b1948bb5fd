//! Document-store DataSource implementation.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::Response;
use tracing::instrument;

use super::DocumentStore;
use crate::db::models::to_document;
use crate::db::{DataSource, DbResult, Entity, Filter, Patch};

/// Every record read back carries its key as a plain string `id`.
const PROJECTION: &str = "*, record::id(id) AS id";

type Bindings = Vec<(String, Value)>;

#[derive(Deserialize)]
struct Count {
    count: u64,
}

/// Data source over the table named by `T::COLLECTION`.
pub struct DocumentDataSource<T: Entity> {
    store: DocumentStore,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> DocumentDataSource<T> {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            store: store.clone(),
            _entity: PhantomData,
        }
    }

    /// Run one statement with `$tb` bound to this collection.
    async fn run(&self, sql: String, bindings: Bindings) -> DbResult<Response> {
        let mut query = self.store.db().query(sql).bind(("tb", T::COLLECTION));
        for binding in bindings {
            query = query.bind(binding);
        }
        Ok(query.await?)
    }
}

/// `WHERE` clause for `filter` plus its bindings; empty for the empty filter.
fn where_clause(filter: &Filter) -> (String, Bindings) {
    let mut clauses = Vec::new();
    let mut bindings = Vec::new();

    for (i, (field, value)) in filter.iter().enumerate() {
        let param = format!("f{i}");
        if field == "id" {
            clauses.push(format!("id = type::thing($tb, ${param})"));
            bindings.push((param, Value::String(key_text(value))));
        } else {
            clauses.push(format!("`{}` = ${param}", field.replace('`', "")));
            bindings.push((param, value.clone()));
        }
    }

    if clauses.is_empty() {
        (String::new(), bindings)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), bindings)
    }
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl<T: Entity> DataSource<T> for DocumentDataSource<T> {
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn count(&self, filter: &Filter) -> DbResult<u64> {
        let (condition, bindings) = where_clause(filter);
        let sql = format!("SELECT count() AS count FROM type::table($tb){condition} GROUP ALL");
        let mut response = self.run(sql, bindings).await?;
        let count: Option<Count> = response.take(0)?;
        Ok(count.map_or(0, |c| c.count))
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find(&self, filter: &Filter) -> DbResult<Vec<T>> {
        let (condition, bindings) = where_clause(filter);
        let sql = format!("SELECT {PROJECTION} FROM type::table($tb){condition} ORDER BY id");
        let mut response = self.run(sql, bindings).await?;
        Ok(response.take(0)?)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_id(&self, id: &str) -> DbResult<Option<T>> {
        let sql = format!("SELECT {PROJECTION} FROM type::thing($tb, $id)");
        let mut response = self
            .run(sql, vec![("id".to_string(), Value::String(id.to_string()))])
            .await?;
        Ok(response.take(0)?)
    }

    #[instrument(skip(self, item), fields(collection = T::COLLECTION))]
    async fn create(&self, item: &T) -> DbResult<()> {
        let doc = Value::Object(to_document(item)?);
        self.run(
            "CREATE type::table($tb) CONTENT $doc".to_string(),
            vec![("doc".to_string(), doc)],
        )
        .await?
        .check()?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn remove(&self, id: &str) -> DbResult<()> {
        self.run(
            "DELETE type::thing($tb, $id)".to_string(),
            vec![("id".to_string(), Value::String(id.to_string()))],
        )
        .await?
        .check()?;
        Ok(())
    }

    #[instrument(skip(self, data), fields(collection = T::COLLECTION))]
    async fn update(&self, id: &str, data: &Patch) -> DbResult<()> {
        let mut data = data.clone();
        data.remove("id");
        self.run(
            "UPDATE type::table($tb) MERGE $data WHERE id = type::thing($tb, $id)"
                .to_string(),
            vec![
                ("id".to_string(), Value::String(id.to_string())),
                ("data".to_string(), Value::Object(data)),
            ],
        )
        .await?
        .check()?;
        Ok(())
    }
}
