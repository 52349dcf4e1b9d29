//! # Axum Helpers
//!
//! Shared HTTP plumbing for the products service.
//!
//! - **[`auth`]**: session token verification, [`CurrentUser`], role guard
//! - **[`server`]**: router assembly with OpenAPI UIs, health, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the structured [`ErrorResponse`]
//! - **[`extractors`]**: [`ValidatedJson`]
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes)?.merge(health_router(app_info!()));
//! create_production_app(router, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{CurrentUser, JwtAuth, JwtConfig, RequiredRole, identity_middleware, require_role};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;
