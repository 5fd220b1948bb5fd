//! API route configuration.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::resource::{Resource, ResourceRules};
use super::state::AppState;
use super::validation::validate;
use crate::usecase::UseCases;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    system_routes
        .merge(entity_routes(state.users))
        .merge(entity_routes(state.customers))
        .merge(entity_routes(state.products))
        .method_not_allowed_fallback(handlers::route_not_found)
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
}

/// CRUD routes for one resource under `/<collection>`.
///
/// Every route that reads the body or the id sits behind its validation gate.
pub fn entity_routes<T: Resource>(use_cases: Arc<UseCases<T>>) -> Router {
    let rules = ResourceRules::of::<T>();

    let collection = get(handlers::list::<T>).merge(
        post(handlers::create::<T>).layer(from_fn_with_state(Arc::new(rules.create), validate)),
    );

    let by_id = Arc::new(rules.by_id);
    let item = get(handlers::get_one::<T>)
        .layer(from_fn_with_state(Arc::clone(&by_id), validate))
        .merge(
            put(handlers::update::<T>)
                .layer(from_fn_with_state(Arc::new(rules.update), validate)),
        )
        .merge(delete(handlers::delete::<T>).layer(from_fn_with_state(by_id, validate)));

    let base = format!("/{}", T::COLLECTION);
    Router::new()
        .route(&base, collection.clone())
        .route(&format!("{base}/"), collection)
        .route(&format!("{base}/{{id}}"), item)
        .with_state(use_cases)
}
