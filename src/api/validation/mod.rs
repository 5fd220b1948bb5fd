//! Request validation pipeline.
//!
//! [`RequestRules`] names up to three schemas (body, path params, query).
//! The [`validate`] middleware checks every configured section, gathers one
//! [`Violation`] per failing section, and either short-circuits with 400 or
//! hands the untouched request to the route handler. Path and query values
//! reach their schemas as strings.

mod middleware;
mod schema;

#[cfg(test)]
mod middleware_test;

use serde::Serialize;
use serde_json::Value;

pub use middleware::validate;
pub use schema::Schema;

/// Part of the request a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Body,
    Params,
    Query,
}

/// One rejected request section and what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub message: String,
    pub section: Section,
}

impl Violation {
    pub fn new(section: Section, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            section,
        }
    }
}

/// Schemas applied to the sections of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestRules {
    pub body: Option<Schema>,
    pub params: Option<Schema>,
    pub query: Option<Schema>,
}

impl RequestRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    pub fn params(mut self, schema: Schema) -> Self {
        self.params = Some(schema);
        self
    }

    pub fn query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.params.is_none() && self.query.is_none()
    }
}

/// Validate one section, folding all its problems into a single violation.
pub fn check_section(section: Section, schema: &Schema, value: Value) -> Option<Violation> {
    schema
        .validate(value)
        .err()
        .map(|errors| Violation::new(section, errors.join(". ")))
}
