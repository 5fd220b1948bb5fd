//! Composition root.
//!
//! Stores are opened once here and handed to their data sources; data
//! sources are wrapped in repositories, repositories in use-cases, and the
//! use-cases become the router's state. Everything lives for the process.

use std::sync::Arc;

use axum::Router;

use crate::api::{AppState, Config, create_router};
use crate::db::{
    Customer, DataSource, DbResult, DocumentDataSource, DocumentStore, Entity, Product,
    Repository, SqliteDataSource, SqliteStore, User,
};
use crate::usecase::UseCases;

/// The fully wired object graph.
pub struct Container {
    state: AppState,
}

impl Container {
    /// Open the stores named by `config`, migrate the relational one, then wire everything.
    pub async fn build(config: &Config) -> DbResult<Self> {
        let sqlite = SqliteStore::open(&config.database_url).await?;
        sqlite.migrate().await?;
        let documents = DocumentStore::open(&config.document_url).await?;
        Ok(Self::from_stores(&sqlite, &documents))
    }

    /// Wire against fresh in-memory stores.
    pub async fn in_memory() -> DbResult<Self> {
        Self::build(&Config::default()).await
    }

    /// Users and customers live in the relational store, products in the document store.
    pub fn from_stores(sqlite: &SqliteStore, documents: &DocumentStore) -> Self {
        let users = use_cases(SqliteDataSource::<User>::new(sqlite));
        let customers = use_cases(SqliteDataSource::<Customer>::new(sqlite));
        let products = use_cases(DocumentDataSource::<Product>::new(documents));

        Self {
            state: AppState::new(users, customers, products),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }
}

fn use_cases<T: Entity>(source: impl DataSource<T> + 'static) -> UseCases<T> {
    UseCases::new(Repository::new(Arc::new(source)))
}
