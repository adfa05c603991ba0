//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Productos API",
        version = "0.1.0",
        description = "MongoDB-backed CRUD API for the productos catalogue"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/productos", api = domain_productos::ApiDoc)
    ),
    tags(
        (name = "Productos", description = "Producto catalogue endpoints")
    )
)]
pub struct ApiDoc;
