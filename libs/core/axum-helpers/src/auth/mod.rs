//! Request identity and role checks.
//!
//! Tokens are issued by the session service; this module only verifies them.
//! [`identity_middleware`] runs on every request and, when a valid token is
//! present, stores a [`CurrentUser`] in the request extensions. Routes that
//! need a particular role add [`require_role`] as a route layer:
//!
//! ```ignore
//! use axum::middleware::{from_fn, from_fn_with_state};
//! use axum_helpers::auth::{JwtAuth, RequiredRole, identity_middleware, require_role};
//!
//! let admin_only = Router::new()
//!     .route("/", post(create))
//!     .route_layer(from_fn_with_state(RequiredRole::ADMIN, require_role));
//!
//! let app = Router::new()
//!     .merge(admin_only)
//!     .layer(from_fn_with_state(jwt_auth, identity_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{Claims, CurrentUser, JwtAuth};
pub use middleware::{RequiredRole, identity_middleware, require_role};
