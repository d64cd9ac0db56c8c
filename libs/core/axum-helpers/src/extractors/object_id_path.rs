//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a 24 character hex ObjectId in the path.
///
/// Malformed values are rejected with 400 "Invalid ObjectId" before the
/// handler runs, so nothing reaches the store.
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_customer(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app: Router = Router::new().route("/customer/{id}", get(get_customer));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        ObjectId::parse_str(&id)
            .map(ObjectIdPath)
            .map_err(|_| AppError::InvalidObjectId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/things/{id}",
            get(|ObjectIdPath(id): ObjectIdPath| async move { id.to_hex() }),
        )
    }

    #[tokio::test]
    async fn test_accepts_24_hex_id() {
        let response = app()
            .oneshot(
                Request::get("/things/65a1f0c2e4b0a1b2c3d4e5f6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_malformed_id() {
        for bad in ["123", "zzzzzzzzzzzzzzzzzzzzzzzz", "65a1f0c2e4b0a1b2c3d4e5f6aa"] {
            let response = app()
                .oneshot(
                    Request::get(format!("/things/{bad}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{bad}");
        }
    }
}
