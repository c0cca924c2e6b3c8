//! Products API - REST server for the product inventory

use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{error, info};

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

    info!(url = %config.database.redacted_url(), "Connecting to PostgreSQL");

    let db = connect_with_retry(&config.database, &config.retry)
        .await
        .inspect_err(|e| error!("Could not connect to PostgreSQL: {}", e))?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db).await?;
    } else {
        info!("RUN_MIGRATIONS is disabled, skipping migrations");
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting Products API on {}",
        state.config.server.address()
    );

    let db = state.db.clone();
    create_production_app(app, &state.config.server, Duration::from_secs(30), async move {
        close_postgres(db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
