//! Request payloads for each exposed entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::validation::{RequestRules, Schema};
use crate::db::{Customer, DbResult, Entity, Patch, Product, User};

/// An entity exposed over HTTP, with the payloads its routes accept.
pub trait Resource: Entity {
    /// Body of `POST /<collection>`.
    type Draft: DeserializeOwned + Validate;
    /// Body of `PUT /<collection>/{id}`; every field optional.
    type Changes: DeserializeOwned + Serialize + Validate + Send + 'static;
}

/// Create body for entities that carry only a name.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NamedDraft {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 1, max = 100, message = "\"name\" must be between 1 and 100 characters long")
    )]
    pub name: Option<String>,
}

/// Update body for entities that carry only a name.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NamedChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "\"name\" must be between 1 and 100 characters long"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductDraft {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 1, max = 100, message = "\"name\" must be between 1 and 100 characters long")
    )]
    pub name: Option<String>,
    #[serde(rename = "unitPrice")]
    #[validate(range(min = 0.0, message = "\"unitPrice\" must be greater than or equal to 0"))]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "\"name\" must be between 1 and 100 characters long"))]
    pub name: Option<String>,
    #[serde(rename = "unitPrice", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "\"unitPrice\" must be greater than or equal to 0"))]
    pub unit_price: Option<f64>,
}

/// Path of every single-record route.
#[derive(Debug, Deserialize, Validate)]
pub struct IdPath {
    #[validate(length(min = 1, message = "\"id\" is not allowed to be empty"))]
    pub id: String,
}

impl Resource for User {
    type Draft = NamedDraft;
    type Changes = NamedChanges;
}

impl Resource for Customer {
    type Draft = NamedDraft;
    type Changes = NamedChanges;
}

impl Resource for Product {
    type Draft = ProductDraft;
    type Changes = ProductChanges;
}

/// The fields `changes` sets, ready for a store update.
pub fn to_patch<C: Serialize>(changes: &C) -> DbResult<Patch> {
    match serde_json::to_value(changes)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Patch::new()),
    }
}

/// The validation gates in front of one resource's routes.
#[derive(Debug, Clone)]
pub struct ResourceRules {
    pub create: RequestRules,
    pub update: RequestRules,
    pub by_id: RequestRules,
}

impl ResourceRules {
    pub fn of<T: Resource>() -> Self {
        let id = Schema::of::<IdPath>();
        Self {
            create: RequestRules::new().body(Schema::of::<T::Draft>()),
            update: RequestRules::new()
                .params(id)
                .body(Schema::of::<T::Changes>()),
            by_id: RequestRules::new().params(id),
        }
    }
}
