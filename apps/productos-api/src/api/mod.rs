//! API routes module

pub mod health;
pub mod productos;

use axum::Router;

use crate::state::AppState;

/// All API routes; mounted at the root by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/productos", productos::router(state))
        .merge(health::router(state.clone()))
}
