//! Bearer token authentication.
//!
//! - [`JwtConfig`]: signing secret and token lifetime from the environment
//! - [`JwtAuth`]: HS256 token issuing and verification
//! - [`jwt_auth_middleware`]: rejects requests without a valid token whose
//!   subject still resolves to a principal
//!
//! ```ignore
//! use axum_helpers::auth::{AuthState, JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//! let auth = AuthState::new(jwt, Arc::new(resolver));
//!
//! let protected = Router::new()
//!     .route("/customer", get(list))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware::<MyResolver>));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::{JwtConfig, MAX_TOKEN_TTL_SECS};
pub use jwt::{DEFAULT_TOKEN_TTL_SECS, JwtAuth, JwtClaims};
pub use middleware::{AuthState, PrincipalResolver, bearer_token, jwt_auth_middleware};
