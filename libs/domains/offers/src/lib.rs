//! Offers Domain
//!
//! Price offers sent to customers. The offer number is chosen by the caller
//! and must be unique; the customer and order references are stored as
//! plain ids and not checked against their collections.

pub mod handlers;
pub mod models;

use crud::CrudService;
use mongodb::{IndexModel, bson::doc, options::IndexOptions};

pub use handlers::ApiDoc;
pub use models::{CreateOffer, LineItem, Offer, OfferFilter, OfferStatus, UpdateOffer};

pub type OfferService<R> = CrudService<Offer, R>;

pub fn indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "offerNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder()
            .keys(doc! { "customerId": 1, "status": 1 })
            .build(),
        IndexModel::builder().keys(doc! { "date": -1 }).build(),
        IndexModel::builder().keys(doc! { "validUntil": 1 }).build(),
    ]
}
