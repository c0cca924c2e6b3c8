//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`validation`]**: declarative field rules evaluated per endpoint
//! - **[`extractors`]**: [`ValidatedRequest`], which runs an endpoint's rules before its handler
//! - **[`errors`]**: [`AppError`] and the JSON error bodies it renders
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.cors)?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use errors::{AppError, ErrorCode, ErrorResponse, NotFoundBody, ValidationErrorBody};
pub use extractors::ValidatedRequest;
pub use http::{create_cors_layer, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
};
pub use validation::{Check, FieldError, Location, RequestInput, RequestRules, Rule, evaluate};
