use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Looks up the account behind a verified token.
///
/// Returning `Ok(None)` means the subject no longer exists and the request
/// is rejected with 401.
#[async_trait]
pub trait PrincipalResolver: Send + Sync + 'static {
    type Principal: Clone + Send + Sync + 'static;

    async fn resolve(&self, claims: &JwtClaims) -> Result<Option<Self::Principal>, AppError>;
}

/// State for [`jwt_auth_middleware`]
pub struct AuthState<P> {
    pub jwt: JwtAuth,
    pub resolver: Arc<P>,
}

impl<P> AuthState<P> {
    pub fn new(jwt: JwtAuth, resolver: Arc<P>) -> Self {
        Self { jwt, resolver }
    }
}

impl<P> Clone for AuthState<P> {
    fn clone(&self) -> Self {
        Self {
            jwt: self.jwt.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Verifies the bearer token, resolves its subject and inserts both the
/// [`JwtClaims`] and the resolved principal into request extensions.
pub async fn jwt_auth_middleware<P: PrincipalResolver>(
    State(auth): State<AuthState<P>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("No token provided".to_string()));
    };

    let claims = auth.jwt.verify_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    let Some(principal) = auth.resolver.resolve(&claims).await? else {
        tracing::debug!(sub = %claims.sub, "Token subject no longer exists");
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    };

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
