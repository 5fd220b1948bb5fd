//! Data access layer.
//!
//! Business logic depends only on [`Repository`], which delegates to a
//! [`DataSource`]. Concrete data sources adapt one storage technology each,
//! so the relational store and the document store can be swapped without
//! touching anything above this module.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Entities, filters and patches
//! - `data_source`: The uniform CRUD contract
//! - `repository`: Use-case facing delegate
//! - `sqlite`: Relational data source (sqlx)
//! - `document`: Document-store data source

pub mod data_source;
mod document;
mod error;
pub(crate) mod models;
mod repository;
mod sqlite;

#[cfg(test)]
mod repository_test;

pub use data_source::DataSource;
pub use document::{DocumentDataSource, DocumentStore};
pub use error::{DbError, DbResult};
pub use models::{Customer, Entity, Filter, Id, Patch, Product, User};
pub use repository::Repository;
pub use sqlite::{SqliteDataSource, SqliteStore};
