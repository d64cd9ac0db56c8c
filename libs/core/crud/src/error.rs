use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, is_duplicate_key};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(mongodb::error::Error),
}

pub type CrudResult<T> = Result<T, CrudError>;

impl CrudError {
    /// `"<name> not found"`
    pub fn not_found(name: &str) -> Self {
        CrudError::NotFound(format!("{name} not found"))
    }
}

impl From<mongodb::error::Error> for CrudError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            CrudError::Conflict("Resource already exists".to_string())
        } else {
            CrudError::Database(err)
        }
    }
}

impl From<CrudError> for AppError {
    fn from(err: CrudError) -> Self {
        match err {
            CrudError::NotFound(msg) => AppError::NotFound(msg),
            CrudError::Conflict(msg) => AppError::Conflict(msg),
            CrudError::Validation(errors) => AppError::ValidationError(errors),
            CrudError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message() {
        let err = CrudError::not_found("Customer");
        assert_eq!(err.to_string(), "Customer not found");
    }

    #[test]
    fn test_status_mapping() {
        let status = |e: CrudError| e.into_response().status();
        assert_eq!(status(CrudError::not_found("Offer")), StatusCode::NOT_FOUND);
        assert_eq!(
            status(CrudError::Conflict("Offer with this number already exists".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(CrudError::Validation(ValidationErrors::new())),
            StatusCode::BAD_REQUEST
        );
    }
}
