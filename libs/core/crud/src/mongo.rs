//! MongoDB implementation of [`Repository`]

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::entity::Entity;
use crate::error::CrudResult;
use crate::hex_id;
use crate::query::FindSpec;
use crate::repository::Repository;

/// Repository over the `T::COLLECTION` collection
pub struct MongoRepository<T: Entity> {
    collection: Collection<T>,
}

impl<T: Entity> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<T>(T::COLLECTION),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Create `indexes`; existing identical indexes are left alone.
    #[instrument(skip(self, indexes), fields(collection = T::COLLECTION))]
    pub async fn create_indexes(&self, indexes: Vec<IndexModel>) -> CrudResult<()> {
        if indexes.is_empty() {
            return Ok(());
        }
        self.collection.create_indexes(indexes).await?;
        tracing::info!("Indexes ensured");
        Ok(())
    }
}

impl<T: Entity> Clone for MongoRepository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    #[instrument(skip(self, entity), fields(collection = T::COLLECTION, id = %entity.id()))]
    async fn insert(&self, entity: T) -> CrudResult<T> {
        self.collection.insert_one(&entity).await?;
        tracing::info!("Document inserted");
        Ok(entity)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_id(&self, id: ObjectId) -> CrudResult<Option<T>> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_one(&self, filter: Document) -> CrudResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_many(&self, filter: Document, spec: FindSpec) -> CrudResult<Vec<T>> {
        let cursor = self
            .collection
            .find(filter)
            .sort(spec.sort)
            .skip(spec.skip)
            .limit(spec.limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn count(&self, filter: Document) -> CrudResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    #[instrument(skip(self, entity), fields(collection = T::COLLECTION, id = %entity.id()))]
    async fn replace(&self, entity: T) -> CrudResult<Option<T>> {
        let result = self
            .collection
            .replace_one(doc! { "_id": hex_id::to_bson(entity.id()) }, &entity)
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        tracing::info!("Document replaced");
        Ok(Some(entity))
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn delete(&self, id: ObjectId) -> CrudResult<bool> {
        let result = self.collection.delete_one(by_id(id)).await?;
        if result.deleted_count > 0 {
            tracing::info!(id = %id, "Document deleted");
        }
        Ok(result.deleted_count > 0)
    }
}
