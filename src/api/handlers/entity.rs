//! Generic CRUD handlers, instantiated once per entity type.
//!
//! Each handler runs one use-case and turns its outcome into a response;
//! failures become [`ApiError`] and are rendered by its `IntoResponse`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, instrument};

use crate::api::resource::{Resource, to_patch};
use crate::api::validation::{Section, Violation};
use crate::api::{ApiError, MessageResponse};
use crate::db::Entity;
use crate::usecase::UseCases;

type Handlers<T> = State<Arc<UseCases<T>>>;

/// Turn a body the gate let through but serde still refuses into a 400.
fn payload<P>(payload: Result<Json<P>, JsonRejection>) -> Result<P, ApiError> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| ApiError::Validation(vec![Violation::new(Section::Body, e.body_text())]))
}

#[instrument(skip(use_cases), fields(entity = T::KIND))]
pub async fn list<T: Entity>(State(use_cases): Handlers<T>) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(use_cases.get_all().await?))
}

#[instrument(skip(use_cases), fields(entity = T::KIND))]
pub async fn get_one<T: Entity>(
    State(use_cases): Handlers<T>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(use_cases.get_one(&id).await?))
}

#[instrument(skip(use_cases, body), fields(entity = T::KIND))]
pub async fn create<T: Entity>(
    State(use_cases): Handlers<T>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let item = payload(body)?;
    use_cases.create(&item).await?;
    info!(name = item.name(), "created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("{} Created", T::KIND))),
    ))
}

#[instrument(skip(use_cases, body), fields(entity = T::KIND))]
pub async fn update<T: Resource>(
    State(use_cases): Handlers<T>,
    Path(id): Path<String>,
    body: Result<Json<T::Changes>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let data = to_patch(&payload(body)?).map_err(ApiError::StoreFault)?;
    use_cases.update(&id, &data).await?;
    info!(%id, "updated");
    Ok(Json(MessageResponse::new(format!("{} Updated", T::KIND))))
}

#[instrument(skip(use_cases), fields(entity = T::KIND))]
pub async fn delete<T: Entity>(
    State(use_cases): Handlers<T>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    use_cases.delete(&id).await?;
    info!(%id, "deleted");
    Ok(Json(MessageResponse::new(format!("{} Deleted", T::KIND))))
}
