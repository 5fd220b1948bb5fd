//! Application state for the API server.

use std::sync::Arc;

use crate::db::{Customer, Product, User};
use crate::usecase::UseCases;

/// The wired use-case sets the router dispatches to.
///
/// Built by the composition root; each entity's routes receive only their
/// own use-cases as axum state, so nothing is looked up at request time.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UseCases<User>>,
    pub customers: Arc<UseCases<Customer>>,
    pub products: Arc<UseCases<Product>>,
}

impl AppState {
    pub fn new(
        users: UseCases<User>,
        customers: UseCases<Customer>,
        products: UseCases<Product>,
    ) -> Self {
        Self {
            users: Arc::new(users),
            customers: Arc::new(customers),
            products: Arc::new(products),
        }
    }
}
