use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::RouteNotFound.default_message().to_string(),
        ErrorCode::RouteNotFound,
    )
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
    )
}
