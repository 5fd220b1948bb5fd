//! Database error types.
//!
//! These are the faults a data source can raise. They are storage-backend
//! agnostic and are never interpreted by the repository or use-case layers;
//! only the HTTP boundary decides what to do with them.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database error: {message}")]
    #[diagnostic(code(clean_crud::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(clean_crud::db::connection_error))]
    Connection { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(clean_crud::db::migration_error))]
    Migration { message: String },

    #[error("Serialization error: {message}")]
    #[diagnostic(
        code(clean_crud::db::serialization_error),
        help("stored documents must deserialize into the entity type")
    )]
    Serialization { message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::Connection {
                    message: e.to_string(),
                }
            }
            _ => DbError::Database {
                message: e.to_string(),
            },
        }
    }
}

impl From<surrealdb::Error> for DbError {
    fn from(e: surrealdb::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::Serialization {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
