//! Products API routes

use axum::{middleware::from_fn_with_state, Router};
use axum_helpers::{identity_middleware, JwtAuth};
use domain_products::{handlers, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Products router with the caller's identity resolved from the JWT
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    let jwt = JwtAuth::new(&state.config.jwt);

    handlers::router(service).layer(from_fn_with_state(jwt, identity_middleware))
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
