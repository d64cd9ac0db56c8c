//! Products API routes

use axum::Router;
use crud::MongoRepository;
use domain_products::{Product, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoRepository::<Product>::new(&state.db);
    handlers::router(ProductService::new(repository))
}
