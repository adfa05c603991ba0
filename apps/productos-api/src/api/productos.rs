//! Productos API routes
//!
//! Wires the productos domain to its MongoDB repository.

use axum::Router;
use domain_productos::{MongoProductoRepository, ProductoService, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductoRepository::new(&state.db);
    handlers::router(ProductoService::new(repository))
}

/// Create the unique `titulo` index
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoProductoRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create producto indexes: {}", e))?;
    info!("Producto collection indexes created");
    Ok(())
}
