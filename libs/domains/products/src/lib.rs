//! Products Domain
//!
//! Catalogue entries with optional variants, each carrying its own
//! attributes and per-currency prices. Served through the generic
//! [`crud::CrudService`].

pub mod handlers;
pub mod models;

use crud::CrudService;
use mongodb::{IndexModel, bson::doc};

pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, Currency, Product, ProductFilter, ProductPrice, ProductVariant, UpdateProduct,
    VariantAttribute,
};

pub type ProductService<R> = CrudService<Product, R>;

/// Name and category lookups
pub fn indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder().keys(doc! { "name": 1 }).build(),
        IndexModel::builder().keys(doc! { "categoryId": 1 }).build(),
    ]
}
