//! Document-store implementation of the [`DataSource`](crate::db::DataSource) contract.
//!
//! Backed by an embedded SurrealDB engine (`mem://` or `surrealkv://`). Each
//! collection is a schemaless table whose records get store-generated keys;
//! filters compare top-level fields for equality.

mod data_source;
mod store;


pub use data_source::DocumentDataSource;
pub use store::DocumentStore;
