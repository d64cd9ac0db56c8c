//! Customers API routes

use axum::Router;
use crud::MongoRepository;
use domain_customers::{Customer, CustomerService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoRepository::<Customer>::new(&state.db);
    handlers::router(CustomerService::new(repository))
}
