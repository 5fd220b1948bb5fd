//! Shared helper functions for SQLite data sources.

use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite};

use crate::db::Filter;

/// Build the JSON path addressing a top-level document field.
///
/// The key is quoted so field names containing dots or spaces address a
/// single key rather than a nested path.
pub fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}

/// Append a WHERE clause for `filter` (nothing for the empty filter).
///
/// `id` compares the primary key; every other field compares the value
/// extracted from the stored document. Values are always bound, never
/// interpolated.
pub fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    for (i, (field, value)) in filter.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });

        if field == "id" {
            qb.push("id");
        } else {
            qb.push("json_extract(doc, ");
            qb.push_bind(json_path(field));
            qb.push(")");
        }

        if value.is_null() {
            qb.push(" IS NULL");
        } else {
            qb.push(" = ");
            push_value(qb, value);
        }
    }
}

/// Bind a JSON scalar the way `json_extract` would return it.
fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &Value) {
    match value {
        Value::String(s) => {
            qb.push_bind(s.clone());
        }
        Value::Bool(b) => {
            qb.push_bind(i64::from(*b));
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => {
                qb.push_bind(i);
            }
            None => {
                qb.push_bind(n.as_f64().unwrap_or_default());
            }
        },
        // json_extract renders containers as minified JSON text
        Value::Array(_) | Value::Object(_) => {
            qb.push("json(");
            qb.push_bind(value.to_string());
            qb.push(")");
        }
        Value::Null => {
            qb.push("NULL");
        }
    }
}
