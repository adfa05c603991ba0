use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::validate_not_blank;

/// Producto as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    /// ObjectId as 24 lowercase hex characters
    #[serde(rename = "_id")]
    #[schema(example = "65e764e6275e99bd7b4ea435")]
    pub id: String,
    #[schema(example = "Cerradura travex")]
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Cerradura mecánica")]
    pub descripcion: Option<String>,
    #[schema(example = 20.0)]
    pub precio: f64,
    #[schema(example = 10.0)]
    pub stock: f64,
    #[schema(example = "Cerradura")]
    pub categoria: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Producto as stored in the `productos` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: f64,
    pub categoria: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// DTO for creating a producto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProducto {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Cerradura travex")]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: f64,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Cerradura")]
    pub categoria: String,
}

/// DTO for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProducto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub stock: Option<f64>,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub categoria: Option<String>,
}

impl UpdateProducto {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl ProductoDocument {
    /// New document with a fresh id; `createdAt == updatedAt` and `titulo` trimmed.
    pub fn new(input: CreateProducto) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            titulo: input.titulo.trim().to_string(),
            descripcion: input.descripcion,
            precio: input.precio,
            stock: input.stock,
            categoria: input.categoria,
            created_at: now,
            updated_at: now,
        }
    }
}

fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<ProductoDocument> for Producto {
    fn from(doc: ProductoDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            titulo: doc.titulo,
            descripcion: doc.descripcion,
            precio: doc.precio,
            stock: doc.stock,
            categoria: doc.categoria,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}
