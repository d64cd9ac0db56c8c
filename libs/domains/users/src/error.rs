use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use crud::CrudError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailInUse,

    /// Unknown email and wrong password share this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error(transparent)]
    Store(#[from] CrudError),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailInUse => AppError::Conflict("Email already in use".to_string()),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            AuthError::Token(msg) => {
                tracing::error!("Token error: {}", msg);
                AppError::InternalServerError("Failed to create token".to_string())
            }
            AuthError::Store(err) => err.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::PasswordHash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let status = |e: AuthError| e.into_response().status();
        assert_eq!(status(AuthError::EmailInUse), StatusCode::CONFLICT);
        assert_eq!(status(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(AuthError::PasswordHash("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(AuthError::Store(CrudError::not_found("User"))),
            StatusCode::NOT_FOUND
        );
    }
}
