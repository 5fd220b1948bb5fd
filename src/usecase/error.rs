//! Use-case error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::{DbError, Id};

/// Outcome of a rejected or failed business operation.
#[derive(Error, Diagnostic, Debug)]
pub enum UseCaseError {
    #[error("{entity} not found: no record with id '{id}'")]
    #[diagnostic(code(clean_crud::usecase::not_found))]
    NotFound { entity: &'static str, id: Id },

    #[error("{entity} already exists: name '{name}' is taken")]
    #[diagnostic(code(clean_crud::usecase::already_exists))]
    AlreadyExists { entity: &'static str, name: String },

    /// A store fault, passed through untouched.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] DbError),
}

/// Result type for use-case operations.
pub type UseCaseResult<T> = Result<T, UseCaseError>;
