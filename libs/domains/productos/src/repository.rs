use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::RepositoryResult;
use crate::models::{CreateProducto, Producto, UpdateProducto};

/// Repository trait for Producto persistence
///
/// Each method is a single store round-trip. Lookups by id return `None`
/// when nothing matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Insert a new producto with generated id and timestamps
    async fn create(&self, input: CreateProducto) -> RepositoryResult<Producto>;

    /// Every producto, in store order
    async fn find_all(&self) -> RepositoryResult<Vec<Producto>>;

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Producto>>;

    /// Apply the provided fields and refresh `updatedAt`; returns the post-update document
    async fn update(&self, id: ObjectId, input: UpdateProducto)
        -> RepositoryResult<Option<Producto>>;

    /// Delete and return the document as it was before deletion
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Option<Producto>>;
}
