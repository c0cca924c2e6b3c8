//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this module only
//! adds `/ready`, which probes PostgreSQL.

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::server::run_health_checks;
use database::postgres::check_health_detailed;
use tracing::debug;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Response {
    run_health_checks(vec![(
        "database",
        Box::pin(async {
            let status = check_health_detailed(&state.db).await;
            debug!(response_time_ms = status.response_time_ms, "Database probe finished");

            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_default())
            }
        }),
    )])
    .await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
