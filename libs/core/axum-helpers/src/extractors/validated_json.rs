//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// A body that fails to parse, or parses but fails `Validate`, is rejected
/// with 400. Validation failures list the offending fields in `details`.
///
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Login {
///     #[validate(email)]
///     email: String,
///     #[validate(length(min = 1))]
///     password: String,
/// }
///
/// async fn login(ValidatedJson(payload): ValidatedJson<Login>) -> String {
///     payload.email
/// }
///
/// let app: Router = Router::new().route("/auth/login", post(login));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
