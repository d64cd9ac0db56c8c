//! Customers Domain
//!
//! Individual and corporate customers. Email, when given, is unique across
//! customers.

pub mod handlers;
pub mod models;

use crud::CrudService;
use mongodb::{IndexModel, bson::doc};

pub use handlers::ApiDoc;
pub use models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};

pub type CustomerService<R> = CrudService<Customer, R>;

/// Email and city lookups.
///
/// Email is not a unique index: many customers have none.
pub fn indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder().keys(doc! { "email": 1 }).build(),
        IndexModel::builder().keys(doc! { "city": 1 }).build(),
        IndexModel::builder()
            .keys(doc! { "firstName": 1, "lastName": 1 })
            .build(),
    ]
}
