//! Domain models for the service.
//!
//! Entities are plain records: the persistence layer owns their storage and
//! the core only passes them through. Every entity has a store-assigned `id`
//! and a `name` that is unique within its collection.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DbResult;

/// Identifier assigned by the store on create.
pub type Id = String;

/// Partial field overwrite applied by `update`.
pub type Patch = Map<String, Value>;

/// A record type that can be stored in a collection.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Name used in client-facing messages, e.g. "User".
    const KIND: &'static str;

    /// Collection (or table) holding records of this type.
    const COLLECTION: &'static str;

    /// The collection-unique name of this record.
    fn name(&self) -> &str;
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

impl Entity for User {
    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "user";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";
    const COLLECTION: &'static str = "customer";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    #[serde(rename = "unitPrice", default)]
    pub unit_price: f64,
}

impl Entity for Product {
    const KIND: &'static str = "Product";
    const COLLECTION: &'static str = "product";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Field-to-value mapping that scopes `count` and `find`.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<Id>) -> Self {
        Self::all().with("id", id.into())
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::all().with("name", name.into())
    }

    /// Add an equality constraint on `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for Filter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

/// Serialize an entity into its stored document form (every field except `id`).
pub(crate) fn to_document<T: Entity>(item: &T) -> DbResult<Map<String, Value>> {
    match serde_json::to_value(item)? {
        Value::Object(mut doc) => {
            doc.remove("id");
            Ok(doc)
        }
        other => Err(super::DbError::Serialization {
            message: format!("{} must serialize to an object, got {}", T::KIND, other),
        }),
    }
}

/// Rebuild an entity from its stored document and store-assigned id.
pub(crate) fn from_document<T: Entity>(id: Id, mut doc: Map<String, Value>) -> DbResult<T> {
    doc.insert("id".to_string(), Value::String(id));
    Ok(serde_json::from_value(Value::Object(doc))?)
}
