//! Document store connection handle.

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use tracing::debug;

use crate::db::{DbError, DbResult};

const NAMESPACE: &str = "clean_crud";
const DATABASE: &str = "store";

/// Process-scoped handle to the document store.
///
/// Built once at the composition root and handed to every
/// [`DocumentDataSource`](super::DocumentDataSource). Cloning shares the
/// underlying connection.
#[derive(Clone)]
pub struct DocumentStore {
    db: Surreal<Any>,
}

impl DocumentStore {
    /// Connect using a SurrealDB endpoint, e.g. `mem://` or `surrealkv://data/products`.
    pub async fn open(url: &str) -> DbResult<Self> {
        let db = any::connect(url)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(url, "opened document store");
        Ok(Self { db })
    }

    /// Create an in-memory store (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        Self::open("mem://").await
    }

    pub(crate) fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}
