//! Shared application state handed to the route builders.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Cloned into each router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares one connection pool across clones
    pub mongo_client: Client,
    pub db: Database,
    /// Issues tokens on login and verifies them on protected routes
    pub jwt: JwtAuth,
}
