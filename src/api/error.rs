//! HTTP-facing error type.
//!
//! Every failure a request can end in is one variant here, and
//! [`IntoResponse`] maps each variant to its status and body with a single
//! exhaustive match.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use super::validation::Violation;
use crate::db::DbError;
use crate::usecase::UseCaseError;

/// Body of every non-list, non-violation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request failures, translated to HTTP at the router boundary.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Request failed validation ({} violation(s))", .0.len())]
    #[diagnostic(code(clean_crud::api::validation))]
    Validation(Vec<Violation>),

    #[error("{entity} Not Found")]
    #[diagnostic(code(clean_crud::api::not_found))]
    NotFound { entity: &'static str },

    #[error("{entity} Already Exists")]
    #[diagnostic(code(clean_crud::api::already_exists))]
    AlreadyExists { entity: &'static str },

    #[error("This route does not exist")]
    #[diagnostic(code(clean_crud::api::no_route))]
    RouteNotFound,

    /// Detail stays in the logs; clients only see a generic message.
    #[error("Datasource Error")]
    #[diagnostic(code(clean_crud::api::store_fault))]
    StoreFault(#[source] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ApiError::StoreFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound { entity, .. } => ApiError::NotFound { entity },
            UseCaseError::AlreadyExists { entity, .. } => ApiError::AlreadyExists { entity },
            UseCaseError::Store(e) => ApiError::StoreFault(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ApiError::Validation(violations) => {
                debug!(?violations, "request rejected");
                (status, Json(violations)).into_response()
            }
            ApiError::StoreFault(source) => {
                error!(error = %source, "datasource error");
                (status, Json(MessageResponse::new(message))).into_response()
            }
            ApiError::NotFound { .. } | ApiError::AlreadyExists { .. } | ApiError::RouteNotFound => {
                debug!(%status, %message, "request failed");
                (status, Json(MessageResponse::new(message))).into_response()
            }
        }
    }
}
