//! Orders Domain
//!
//! Sales orders, optionally raised from an accepted offer. Unlike offers,
//! the order number is never supplied by the caller: [`OrderService`]
//! assigns `SO-<year>-<seq>` from the highest number stored for the year.

pub mod handlers;
pub mod models;
pub mod service;

use mongodb::{IndexModel, bson::doc, options::IndexOptions};

pub use handlers::ApiDoc;
pub use models::{CreateOrder, Order, OrderFilter, OrderStatus, PaymentStatus, UpdateOrder};
pub use service::{OrderService, next_order_number};

pub fn indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "orderNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder()
            .keys(doc! { "customerId": 1, "status": 1 })
            .build(),
        IndexModel::builder().keys(doc! { "date": -1 }).build(),
        IndexModel::builder()
            .keys(doc! { "status": 1, "paymentStatus": 1 })
            .build(),
    ]
}
