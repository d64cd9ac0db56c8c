use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use crate::entity::Entity;
use crate::error::CrudResult;
use crate::query::FindSpec;

/// Storage operations for one collection.
///
/// Each method is a single store call; uniqueness and not-found policy live
/// in [`CrudService`](crate::CrudService).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn insert(&self, entity: T) -> CrudResult<T>;

    async fn find_by_id(&self, id: ObjectId) -> CrudResult<Option<T>>;

    /// First document matching `filter`
    async fn find_one(&self, filter: Document) -> CrudResult<Option<T>>;

    async fn find_many(&self, filter: Document, spec: FindSpec) -> CrudResult<Vec<T>>;

    async fn count(&self, filter: Document) -> CrudResult<u64>;

    /// Replace the stored document with the same id. `None` if it is gone.
    async fn replace(&self, entity: T) -> CrudResult<Option<T>>;

    /// `false` when nothing was deleted
    async fn delete(&self, id: ObjectId) -> CrudResult<bool>;
}
