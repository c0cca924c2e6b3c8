//! Resource cleanup run after the server has drained.

use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Close a SeaORM connection pool, logging the outcome.
pub async fn close_postgres(db: DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection '{}' closed", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
