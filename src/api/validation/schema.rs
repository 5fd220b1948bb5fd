//! Section schemas backed by typed payloads.
//!
//! A [`Schema`] names a payload type. Request data passes when it
//! deserializes into that type and the type's `validator::Validate` rules
//! hold. Field errors are all reported; shape errors (wrong JSON type,
//! unknown key) stop at the first one serde meets.

use std::any::type_name;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

/// Validation rules for one request section.
#[derive(Clone, Copy)]
pub struct Schema {
    payload: &'static str,
    check: fn(Value) -> Result<(), Vec<String>>,
}

impl Schema {
    /// Rules of payload type `P`.
    pub fn of<P: DeserializeOwned + Validate>() -> Self {
        Self {
            payload: type_name::<P>(),
            check: check::<P>,
        }
    }

    /// Every problem with `value`, or `Ok` when it is an acceptable `P`.
    pub fn validate(&self, value: Value) -> Result<(), Vec<String>> {
        (self.check)(value)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("payload", &self.payload)
            .finish()
    }
}

fn check<P: DeserializeOwned + Validate>(value: Value) -> Result<(), Vec<String>> {
    if !value.is_object() {
        return Err(vec!["\"value\" must be of type object".to_string()]);
    }
    let payload: P = serde_json::from_value(value).map_err(|e| vec![e.to_string()])?;
    payload.validate().map_err(|report| messages(&report))
}

/// Flatten a report into messages, ordered by field name.
fn messages(report: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = report
        .field_errors()
        .into_iter()
        .map(|(field, errors)| (field.to_string(), errors))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("\"{field}\" failed {}", error.code),
            })
        })
        .collect()
}
