//! Axum middleware applying [`RequestRules`] ahead of a route handler.

use std::collections::HashMap;
use std::sync::Arc;

use axum::RequestPartsExt;
use axum::body::{Body, Bytes};
use axum::extract::{Query, RawPathParams, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use tracing::warn;

use super::{RequestRules, Section, Violation, check_section};
use crate::api::ApiError;

/// Largest request body the gate will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// Gate a request on its configured schemas.
///
/// Use with `axum::middleware::from_fn_with_state(Arc<RequestRules>, validate)`.
pub async fn validate(
    State(rules): State<Arc<RequestRules>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut violations = Vec::new();

    let body = match &rules.body {
        Some(schema) => {
            let bytes = match axum::body::to_bytes(body, BODY_LIMIT).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    let violation = Violation::new(Section::Body, e.to_string());
                    return ApiError::Validation(vec![violation]).into_response();
                }
            };
            match parse_body(&bytes) {
                Ok(value) => violations.extend(check_section(Section::Body, schema, value)),
                Err(message) => violations.push(Violation::new(Section::Body, message)),
            }
            Body::from(bytes)
        }
        None => body,
    };

    if let Some(schema) = &rules.params {
        let params = path_params(&mut parts).await;
        violations.extend(check_section(Section::Params, schema, params));
    }

    if let Some(schema) = &rules.query {
        let query = query_params(&parts);
        violations.extend(check_section(Section::Query, schema, query));
    }

    if !violations.is_empty() {
        warn!(
            method = %parts.method,
            uri = %parts.uri,
            count = violations.len(),
            "request failed validation"
        );
        return ApiError::Validation(violations).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// An empty body reads as `{}`.
fn parse_body(bytes: &Bytes) -> Result<Value, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| format!("\"body\" must be valid JSON: {e}"))
}

async fn path_params(parts: &mut Parts) -> Value {
    let mut object = Map::new();
    if let Ok(params) = parts.extract::<RawPathParams>().await {
        for (key, value) in &params {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(object)
}

fn query_params(parts: &Parts) -> Value {
    let pairs = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();
    Value::Object(
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
    )
}
