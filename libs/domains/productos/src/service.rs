//! Producto Service - id validation, input validation and error formatting

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{format_error, ProductoError, ProductoResult};
use crate::models::{CreateProducto, Producto, UpdateProducto};
use crate::repository::ProductoRepository;
use crate::validation::parse_object_id;

/// Location reported in every error message raised here
pub const LOCATION: &str = "productos.service";

pub struct ProductoService<R: ProductoRepository> {
    repository: Arc<R>,
}

impl<R: ProductoRepository> ProductoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn parse_id(method: &str, id: &str) -> ProductoResult<ObjectId> {
        parse_object_id(id).ok_or_else(|| {
            ProductoError::InvalidId(format_error(
                LOCATION,
                method,
                format!("ID no válido: {id}"),
            ))
        })
    }

    /// Create a new producto
    #[instrument(skip(self, input), fields(titulo = %input.titulo))]
    pub async fn create(&self, input: CreateProducto) -> ProductoResult<Producto> {
        input
            .validate()
            .map_err(|e| ProductoError::Validation(format_error(LOCATION, "create", e)))?;

        let producto = self
            .repository
            .create(input)
            .await
            .map_err(|e| ProductoError::from_repository(LOCATION, "create", e))?;

        tracing::info!(producto_id = %producto.id, "Producto creado");
        Ok(producto)
    }

    /// All productos
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductoResult<Vec<Producto>> {
        let productos = self
            .repository
            .find_all()
            .await
            .map_err(|e| ProductoError::from_repository(LOCATION, "findAll", e))?;

        tracing::info!(count = productos.len(), "Productos encontrados");
        Ok(productos)
    }

    /// Producto by id, or `None` when no document matches
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> ProductoResult<Option<Producto>> {
        let object_id = Self::parse_id("findOne", id)?;

        let producto = self
            .repository
            .find_by_id(object_id)
            .await
            .map_err(|e| ProductoError::from_repository(LOCATION, "findOne", e))?;

        tracing::info!(producto_id = %id, found = producto.is_some(), "Producto consultado");
        Ok(producto)
    }

    /// Partial update; returns the updated producto or `None` when no document matches
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProducto,
    ) -> ProductoResult<Option<Producto>> {
        let object_id = Self::parse_id("update", id)?;

        input
            .validate()
            .map_err(|e| ProductoError::Validation(format_error(LOCATION, "update", e)))?;

        let producto = self
            .repository
            .update(object_id, input)
            .await
            .map_err(|e| ProductoError::from_repository(LOCATION, "update", e))?;

        tracing::info!(producto_id = %id, found = producto.is_some(), "Producto actualizado");
        Ok(producto)
    }

    /// Delete; returns the producto as it was before deletion, or `None`
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> ProductoResult<Option<Producto>> {
        let object_id = Self::parse_id("remove", id)?;

        let producto = self
            .repository
            .delete(object_id)
            .await
            .map_err(|e| ProductoError::from_repository(LOCATION, "remove", e))?;

        tracing::info!(producto_id = %id, found = producto.is_some(), "Producto eliminado");
        Ok(producto)
    }
}
