//! Users Domain
//!
//! Accounts, password login and bearer-token issuance.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use crud::MongoRepository;
//! use domain_users::{AuthService, User, handlers};
//!
//! # fn example(db: mongodb::Database) -> Result<(), Box<dyn std::error::Error>> {
//! let jwt = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef")?);
//! let service = AuthService::new(MongoRepository::<User>::new(&db), jwt);
//!
//! let public = handlers::router(service.clone());
//! let protected = handlers::protected_router();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

use mongodb::{IndexModel, bson::doc, options::IndexOptions};

pub use error::{AuthError, AuthResult};
pub use handlers::ApiDoc;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use service::AuthService;

/// Unique lowercase email
pub fn indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
    ]
}
