//! Custom extractors for Axum handlers.
//!
//! Each one rejects with [`AppError`](crate::AppError), so a bad id, body or
//! query string renders the same JSON error body as a handler failure.

pub mod object_id_path;
pub mod validated_json;
pub mod validated_query;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
