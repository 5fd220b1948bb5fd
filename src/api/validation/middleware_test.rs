//! Tests for the validation middleware.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;
use validator::Validate;

use super::{RequestRules, Schema, validate};

async fn echo(body: Bytes) -> Bytes {
    body
}

#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct Item {
    #[validate(required(message = "\"name\" is required"))]
    name: Option<String>,
    #[validate(range(min = 0.0, message = "\"price\" must be greater than or equal to 0"))]
    price: Option<f64>,
}

#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct ItemChanges {
    name: Option<String>,
}

#[derive(Deserialize, Validate)]
struct ItemPath {
    #[validate(length(max = 3, message = "\"id\" is too long"))]
    id: String,
}

#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct Paging {
    #[validate(length(max = 4, message = "\"sort\" is too long"))]
    sort: Option<String>,
}

fn name_schema() -> Schema {
    Schema::of::<Item>()
}

fn app(rules: RequestRules) -> Router {
    let rules = Arc::new(rules);
    Router::new()
        .route(
            "/items/{id}",
            put(echo).layer(from_fn_with_state(Arc::clone(&rules), validate)),
        )
        .route(
            "/items",
            get(echo)
                .post(echo)
                .layer(from_fn_with_state(rules, validate)),
        )
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

fn json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn missing_required_field_yields_single_body_violation() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body),
        json!([{"message": "\"name\" is required", "section": "body"}])
    );
}

#[tokio::test]
async fn valid_body_passes_through_unmodified() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", r#"{"name": "ok"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(br#"{"name": "ok"}"#));
}

#[tokio::test]
async fn violations_within_a_section_are_joined() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", r#"{"price": -1}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body),
        json!([{
            "message": "\"name\" is required. \"price\" must be greater than or equal to 0",
            "section": "body"
        }])
    );
}

#[tokio::test]
async fn string_where_number_expected_is_a_body_violation() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", r#"{"name": "a", "price": "5"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let violations = json(&body);
    assert_eq!(violations.as_array().unwrap().len(), 1);
    assert_eq!(violations[0]["section"], "body");
    assert!(
        violations[0]["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid type: string")
    );
}

#[tokio::test]
async fn unknown_body_key_is_a_violation() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", r#"{"name": "a", "id": "7"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json(&body)[0]["message"]
            .as_str()
            .unwrap()
            .contains("unknown field `id`")
    );
}

#[tokio::test]
async fn violations_accumulate_across_sections() {
    let rules = RequestRules::new()
        .body(name_schema())
        .params(Schema::of::<ItemPath>());
    let app = app(rules);

    let (status, body) = send(app, "PUT", "/items/abcd", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body),
        json!([
            {"message": "\"name\" is required", "section": "body"},
            {"message": "\"id\" is too long", "section": "params"}
        ])
    );
}

#[tokio::test]
async fn path_params_are_validated() {
    let rules = RequestRules::new().params(Schema::of::<ItemPath>());

    let (status, _) = send(app(rules.clone()), "PUT", "/items/12", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(app(rules), "PUT", "/items/1234", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn query_is_validated() {
    let rules = RequestRules::new().query(Schema::of::<Paging>());

    let (status, _) = send(app(rules.clone()), "GET", "/items?sort=name", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app(rules.clone()), "GET", "/items?sort=created", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body),
        json!([{"message": "\"sort\" is too long", "section": "query"}])
    );

    let (status, body) = send(app(rules), "GET", "/items?x=1", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)[0]["section"], "query");
}

#[tokio::test]
async fn malformed_json_is_a_body_violation() {
    let app = app(RequestRules::new().body(name_schema()));

    let (status, body) = send(app, "POST", "/items", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let violations = json(&body);
    assert_eq!(violations[0]["section"], "body");
    assert!(
        violations[0]["message"]
            .as_str()
            .unwrap()
            .starts_with("\"body\" must be valid JSON")
    );
}

#[tokio::test]
async fn empty_body_reads_as_empty_object() {
    let app = app(RequestRules::new().body(Schema::of::<ItemChanges>()));

    let (status, _) = send(app, "POST", "/items", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn no_rules_means_no_gate() {
    let rules = RequestRules::new();
    assert!(rules.is_empty());

    let (status, body) = send(app(rules), "POST", "/items", "anything").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(b"anything"));
}
