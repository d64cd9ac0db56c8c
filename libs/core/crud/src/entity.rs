use mongodb::bson::Document;
use serde::{Serialize, de::DeserializeOwned};

/// A record stored as one document in [`Entity::COLLECTION`].
///
/// The id is the hex form of an ObjectId. It is stored in `_id` as an
/// ObjectId through [`hex_id`](crate::hex_id).
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// An entity served through the generic list/get/update/delete endpoints.
pub trait Resource: Entity {
    /// Display name used in error messages, e.g. "Customer not found"
    const NAME: &'static str;

    /// Field sorted descending when the caller gives no `sort`
    const DEFAULT_SORT: &'static str;

    /// Whether paged responses echo the effective `limit`
    const PAGE_INCLUDES_LIMIT: bool = false;

    /// Message returned when the unique key is already taken
    const CONFLICT_MESSAGE: &'static str = "Resource already exists";

    /// Partial update body
    type Update: Send + Sync + 'static;

    /// Query-string filters for listing
    type Filter: Send + Sync + 'static;

    /// Merge `update` into `self` and bump `updatedAt`
    fn apply_update(&mut self, update: Self::Update);

    fn filter_document(filter: &Self::Filter) -> Document;

    /// Field and value that must be unique across the collection, if any
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

/// A resource built directly from its create body.
pub trait Creatable: Resource {
    type Create: Send + Sync + 'static;

    /// Assign id and timestamps
    fn from_create(input: Self::Create) -> Self;
}
