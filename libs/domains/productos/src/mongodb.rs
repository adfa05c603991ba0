//! MongoDB implementation of ProductoRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::RepositoryResult;
use crate::models::{CreateProducto, Producto, ProductoDocument, UpdateProducto};
use crate::repository::ProductoRepository;

/// Collection holding the productos
pub const COLLECTION: &str = "productos";

/// Name of the unique index on `titulo`
pub const TITULO_INDEX: &str = "idx_titulo_unique";

/// MongoDB implementation of the ProductoRepository
pub struct MongoProductoRepository {
    collection: Collection<ProductoDocument>,
}

impl MongoProductoRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ProductoDocument>(COLLECTION),
        }
    }

    /// Create the unique `titulo` index. Idempotent.
    pub async fn init_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "titulo": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(TITULO_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(index = TITULO_INDEX, "Producto indexes created successfully");
        Ok(())
    }
}

/// `$set` update for the provided fields plus a fresh `updatedAt`.
fn update_document(input: UpdateProducto, now: bson::DateTime) -> Document {
    let mut set = doc! {};

    if let Some(titulo) = input.titulo {
        set.insert("titulo", titulo.trim());
    }
    if let Some(descripcion) = input.descripcion {
        set.insert("descripcion", descripcion);
    }
    if let Some(precio) = input.precio {
        set.insert("precio", precio);
    }
    if let Some(stock) = input.stock {
        set.insert("stock", stock);
    }
    if let Some(categoria) = input.categoria {
        set.insert("categoria", categoria);
    }
    set.insert("updatedAt", now);

    doc! { "$set": set }
}

#[async_trait]
impl ProductoRepository for MongoProductoRepository {
    #[instrument(skip(self, input), fields(titulo = %input.titulo))]
    async fn create(&self, input: CreateProducto) -> RepositoryResult<Producto> {
        let document = ProductoDocument::new(input);

        self.collection.insert_one(&document).await?;

        tracing::info!(producto_id = %document.id, "Producto created successfully");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Producto>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ProductoDocument> = cursor.try_collect().await?;

        tracing::debug!(count = documents.len(), "Productos fetched");
        Ok(documents.into_iter().map(Producto::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Producto>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Producto::from))
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: ObjectId,
        input: UpdateProducto,
    ) -> RepositoryResult<Option<Producto>> {
        let update = update_document(input, bson::DateTime::now());

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if document.is_some() {
            tracing::info!(producto_id = %id, "Producto updated successfully");
        }
        Ok(document.map(Producto::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Option<Producto>> {
        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if document.is_some() {
            tracing::info!(producto_id = %id, "Producto deleted successfully");
        }
        Ok(document.map(Producto::from))
    }
}
