//! Generic CRUD over MongoDB collections.
//!
//! Every business entity is stored one document per record and exposes the
//! same five operations. This crate holds that shape once:
//!
//! ```text
//! handlers (per domain, annotated for OpenAPI)
//!     │
//! CrudService<T, R>   ← unique-key checks, not-found mapping, paging
//!     │
//! Repository<T>       ← trait; MongoRepository<T> implements it
//! ```
//!
//! A domain plugs in by implementing [`Entity`] and [`Resource`] (and
//! [`Creatable`] when records are built straight from a request body).
//! Id and date fields use the [`hex_id`] and [`datetime`] serde adapters so
//! MongoDB stores ObjectIds and BSON Dates while JSON keeps strings.

pub mod datetime;
pub mod entity;
pub mod error;
pub mod hex_id;
pub mod mongo;
pub mod query;
pub mod repository;
pub mod response;
pub mod service;
pub mod validation;

pub use entity::{Creatable, Entity, Resource};
pub use error::{CrudError, CrudResult};
pub use mongo::MongoRepository;
pub use query::{FindSpec, ListQuery, SortSpec, contains_ignore_case, text_search};
pub use repository::Repository;
pub use response::{Paged, Single};
pub use service::CrudService;

#[cfg(any(test, feature = "testing"))]
pub use repository::MockRepository;
