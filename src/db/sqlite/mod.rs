//! SQLite implementation of the [`DataSource`](crate::db::DataSource) contract.
//!
//! Each collection is a table holding a store-assigned integer `id` and a
//! JSON `doc` with the remaining fields.

mod connection;
mod data_source;
mod helpers;


pub use connection::SqliteStore;
pub use data_source::SqliteDataSource;
