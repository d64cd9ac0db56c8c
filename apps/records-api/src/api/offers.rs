//! Offers API routes

use axum::Router;
use crud::MongoRepository;
use domain_offers::{Offer, OfferService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoRepository::<Offer>::new(&state.db);
    handlers::router(OfferService::new(repository))
}
