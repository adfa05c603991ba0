//! Productos Domain
//!
//! CRUD for the `Producto` catalogue entity stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Id/input validation, error formatting
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Stored document, API shape, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_productos::{handlers, MongoProductoRepository, ProductoService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("test");
//!
//! let repository = MongoProductoRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ProductoService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{format_error, ProductoError, ProductoResult, RepositoryError, RepositoryResult};
pub use handlers::ApiDoc;
pub use models::{CreateProducto, Producto, ProductoDocument, UpdateProducto};
pub use self::mongodb::MongoProductoRepository;
pub use repository::ProductoRepository;
pub use service::ProductoService;
pub use validation::is_valid_object_id;
