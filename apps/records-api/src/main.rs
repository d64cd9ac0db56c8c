use axum_helpers::{
    JwtAuth,
    server::{create_production_app, create_router, health_router},
};
use core_config::tracing::{init_tracing, install_color_eyre};
use crud::{Entity, MongoRepository};
use mongodb::{Database, IndexModel};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    ensure_indexes(&db).await?;

    let jwt = JwtAuth::new(&config.jwt);
    let state = AppState {
        config,
        mongo_client,
        db,
        jwt,
    };

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.environment)?;
    let app = router.merge(health_router(state.config.app.clone()));

    info!("Starting Records API with production-ready shutdown (30s timeout)");

    let mongo_client = state.mongo_client.clone();

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Records API shutdown complete");
    Ok(())
}

async fn ensure_indexes(db: &Database) -> eyre::Result<()> {
    create_indexes::<domain_users::User>(db, domain_users::indexes()).await?;
    create_indexes::<domain_customers::Customer>(db, domain_customers::indexes()).await?;
    create_indexes::<domain_products::Product>(db, domain_products::indexes()).await?;
    create_indexes::<domain_offers::Offer>(db, domain_offers::indexes()).await?;
    create_indexes::<domain_orders::Order>(db, domain_orders::indexes()).await?;
    Ok(())
}

async fn create_indexes<T: Entity>(db: &Database, indexes: Vec<IndexModel>) -> eyre::Result<()> {
    MongoRepository::<T>::new(db).create_indexes(indexes).await?;
    Ok(())
}
