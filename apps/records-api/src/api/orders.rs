//! Orders API routes

use axum::Router;
use crud::MongoRepository;
use domain_orders::{Order, OrderService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoRepository::<Order>::new(&state.db);
    handlers::router(OrderService::new(repository))
}
