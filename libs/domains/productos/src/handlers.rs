//! HTTP handlers for Productos API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductoResult;
use crate::models::{CreateProducto, Producto, UpdateProducto};
use crate::repository::ProductoRepository;
use crate::service::ProductoService;

/// OpenAPI documentation for Productos API
#[derive(OpenApi)]
#[openapi(
    paths(create, find_all, find_one, update, remove),
    components(
        schemas(Producto, CreateProducto, UpdateProducto),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Productos", description = "Producto catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the productos router; mount it under `/productos`
pub fn router<R: ProductoRepository + 'static>(service: ProductoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_all).post(create))
        .route("/{id}", get(find_one).patch(update).delete(remove))
        .with_state(shared_service)
}

/// Create a new producto
#[utoipa::path(
    post,
    path = "",
    tag = "Productos",
    request_body = CreateProducto,
    responses(
        (status = 201, description = "Producto created", body = Producto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProducto>,
) -> ProductoResult<impl IntoResponse> {
    let producto = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

/// List all productos
#[utoipa::path(
    get,
    path = "",
    tag = "Productos",
    responses(
        (status = 200, description = "All productos", body = Vec<Producto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_all<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
) -> ProductoResult<Json<Vec<Producto>>> {
    let productos = service.find_all().await?;
    Ok(Json(productos))
}

/// Get a producto by id; `null` when it does not exist
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Producto ObjectId (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Producto, or null when not found", body = Option<Producto>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_one<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
) -> ProductoResult<Json<Option<Producto>>> {
    let producto = service.find_one(&id).await?;
    Ok(Json(producto))
}

/// Partially update a producto; `null` when it does not exist
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Producto ObjectId (24 hex chars)")
    ),
    request_body = UpdateProducto,
    responses(
        (status = 200, description = "Updated producto, or null when not found", body = Option<Producto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProducto>,
) -> ProductoResult<Json<Option<Producto>>> {
    let producto = service.update(&id, input).await?;
    Ok(Json(producto))
}

/// Delete a producto, returning it as it was; `null` when it does not exist
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Producto ObjectId (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Deleted producto, or null when not found", body = Option<Producto>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
) -> ProductoResult<Json<Option<Producto>>> {
    let producto = service.remove(&id).await?;
    Ok(Json(producto))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::models::ProductoDocument;
    use crate::repository::MockProductoRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(mock_repo: MockProductoRepository) -> Router {
        router(ProductoService::new(mock_repo))
    }

    fn sample_producto() -> Producto {
        ProductoDocument::new(CreateProducto {
            titulo: "Cerradura travex".to_string(),
            descripcion: Some("Cerradura mecánica".to_string()),
            precio: 20.0,
            stock: 10.0,
            categoria: "Cerradura".to_string(),
        })
        .into()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(ProductoDocument::new(input).into()));

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "titulo": "Cerradura travex",
                    "descripcion": "Cerradura mecánica",
                    "precio": 20,
                    "stock": 10,
                    "categoria": "Cerradura"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["titulo"], "Cerradura travex");
        assert_eq!(body["precio"], 20.0);
        assert_eq!(body["_id"].as_str().unwrap().len(), 24);
        assert_eq!(body["createdAt"], body["updatedAt"]);
    }

    #[tokio::test]
    async fn test_create_blank_titulo_returns_400_with_details() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_create().never();

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({"titulo": " ", "precio": 1, "stock": 1, "categoria": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["titulo"].is_array());
    }

    #[tokio::test]
    async fn test_create_missing_precio_is_rejected() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_create().never();

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({"titulo": "Cerradura", "stock": 1, "categoria": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_409() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(RepositoryError::DuplicateKey("E11000".to_string())));

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({"titulo": "Cerradura", "precio": 1, "stock": 1, "categoria": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "CONFLICT");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("[ PRODUCTOS.SERVICE ] - METHOD: [create]: E11000"));
    }

    #[tokio::test]
    async fn test_find_all_returns_array() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Ok(vec![sample_producto()]));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_store_failure_returns_500() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(RepositoryError::Store("connection refused".to_string())));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_find_one_invalid_id_returns_400() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find_by_id().never();

        let response = app(mock_repo)
            .oneshot(empty_request("GET", "/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_OBJECT_ID");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("METHOD: [findOne]"));
    }

    #[tokio::test]
    async fn test_find_one_missing_returns_null() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let uri = format!("/{}", ObjectId::new().to_hex());
        let response = app(mock_repo)
            .oneshot(empty_request("GET", &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await, Value::Null);
    }

    #[tokio::test]
    async fn test_update_returns_updated_producto() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_update().returning(|_, input| {
            let mut producto = sample_producto();
            producto.stock = input.stock.unwrap_or(producto.stock);
            Ok(Some(producto))
        });

        let uri = format!("/{}", ObjectId::new().to_hex());
        let response = app(mock_repo)
            .oneshot(json_request("PATCH", &uri, json!({"stock": 3})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["stock"], 3.0);
        assert_eq!(body["titulo"], "Cerradura travex");
    }

    #[tokio::test]
    async fn test_delete_returns_previous_state() {
        let producto = sample_producto();
        let returned = producto.clone();

        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_delete()
            .returning(move |_| Ok(Some(returned.clone())));

        let uri = format!("/{}", producto.id);
        let response = app(mock_repo)
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["_id"], producto.id);
    }

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.paths.paths.len(), 2);
        assert!(doc.paths.paths.contains_key("/{id}"));
    }
}
