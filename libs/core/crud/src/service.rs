use mongodb::bson::{Document, oid::ObjectId};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::entity::{Creatable, Resource};
use crate::error::{CrudError, CrudResult};
use crate::query::ListQuery;
use crate::repository::Repository;
use crate::response::Paged;

/// Create/list/get/update/delete for one resource.
///
/// Unique keys are checked with a read before the write; a unique index on
/// the field catches anything that slips between the two.
pub struct CrudService<T, R> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> Clone for CrudService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _entity: PhantomData,
        }
    }
}

impl<T, R> CrudService<T, R>
where
    T: Resource,
    R: Repository<T>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Build from the create body, then [`insert`](Self::insert).
    pub async fn create(&self, input: T::Create) -> CrudResult<T>
    where
        T: Creatable,
        T::Create: Validate,
    {
        input.validate()?;
        self.insert(T::from_create(input)).await
    }

    /// Persist an already-built entity after checking its unique key.
    #[instrument(skip(self, entity), fields(resource = T::NAME, id = %entity.id()))]
    pub async fn insert(&self, entity: T) -> CrudResult<T> {
        if let Some((field, value)) = entity.unique_key() {
            if self.repository.find_one(key_filter(field, &value)).await?.is_some() {
                return Err(CrudError::Conflict(T::CONFLICT_MESSAGE.to_string()));
            }
        }

        let created = self.repository.insert(entity).await.map_err(conflict_message::<T>)?;
        tracing::info!(id = %created.id(), "{} created", T::NAME);
        Ok(created)
    }

    /// One page of matches plus the total match count.
    #[instrument(skip(self, filter), fields(resource = T::NAME))]
    pub async fn list(&self, filter: &T::Filter, query: &ListQuery) -> CrudResult<Paged<T>> {
        let filter = T::filter_document(filter);
        let spec = query.find_spec(T::DEFAULT_SORT);
        let limit = spec.limit;

        let results = self.repository.find_many(filter.clone(), spec).await?;
        let count = self.repository.count(filter).await?;

        Ok(Paged {
            results,
            page: query.page,
            count,
            limit: T::PAGE_INCLUDES_LIMIT.then_some(limit),
        })
    }

    #[instrument(skip(self), fields(resource = T::NAME))]
    pub async fn get(&self, id: ObjectId) -> CrudResult<T> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CrudError::not_found(T::NAME))
    }

    /// Merge `update` into the stored record.
    ///
    /// Moving the unique key onto a value held by a different record is a
    /// conflict; keeping the current value is not.
    #[instrument(skip(self, update), fields(resource = T::NAME))]
    pub async fn update(&self, id: ObjectId, update: T::Update) -> CrudResult<T>
    where
        T::Update: Validate,
    {
        update.validate()?;

        let existing = self.get(id).await?;
        let previous_key = existing.unique_key();

        let mut updated = existing;
        updated.apply_update(update);

        if let Some((field, value)) = updated.unique_key() {
            let unchanged = previous_key.as_ref().is_some_and(|(_, old)| *old == value);
            if !unchanged {
                if let Some(other) = self.repository.find_one(key_filter(field, &value)).await? {
                    if other.id() != updated.id() {
                        return Err(CrudError::Conflict(T::CONFLICT_MESSAGE.to_string()));
                    }
                }
            }
        }

        let saved = self
            .repository
            .replace(updated)
            .await
            .map_err(conflict_message::<T>)?
            .ok_or_else(|| CrudError::not_found(T::NAME))?;

        tracing::info!(id = %saved.id(), "{} updated", T::NAME);
        Ok(saved)
    }

    #[instrument(skip(self), fields(resource = T::NAME))]
    pub async fn delete(&self, id: ObjectId) -> CrudResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CrudError::not_found(T::NAME));
        }
        tracing::info!(id = %id, "{} deleted", T::NAME);
        Ok(())
    }
}

fn key_filter(field: &str, value: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(field, value);
    filter
}

/// Give index-level duplicate errors the resource's own message
fn conflict_message<T: Resource>(err: CrudError) -> CrudError {
    match err {
        CrudError::Conflict(_) => CrudError::Conflict(T::CONFLICT_MESSAGE.to_string()),
        other => other,
    }
}
