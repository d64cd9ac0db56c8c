//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: HS256 bearer tokens and the authentication middleware
//! - **[`server`]**: Router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: `ObjectIdPath`, `ValidatedJson`, `ValidatedQuery`
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::{Environment, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new(), &Environment::from_env())?;
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    AuthState, JwtAuth, JwtClaims, JwtConfig, PrincipalResolver, bearer_token,
    jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, is_duplicate_key};

pub use extractors::{ObjectIdPath, ValidatedJson, ValidatedQuery};
