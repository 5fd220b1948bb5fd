//! Business operations over a [`Repository`](crate::db::Repository).
//!
//! Rules live here and nowhere else: names are unique per collection and
//! mutations require the target to exist. Each operation issues at most one
//! probe plus one repository call. The probe and the mutation are not atomic,
//! so two concurrent requests for the same key can both pass the check.

mod entity;
mod error;

#[cfg(test)]
mod entity_test;

pub use entity::UseCases;
pub use error::{UseCaseError, UseCaseResult};
