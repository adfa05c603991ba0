//! Integration tests for the productos domain against a real MongoDB
//!
//! Each test starts a MongoDB container through testcontainers and gets its
//! own database, so the unique `titulo` index is exercised against a real server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ::mongodb::bson::oid::ObjectId;
use domain_productos::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::assertions::{assert_object_id, assert_some};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn repository(mongo: &TestMongo, builder: &TestDataBuilder) -> MongoProductoRepository {
    let repo = MongoProductoRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

fn create_input(titulo: &str) -> CreateProducto {
    CreateProducto {
        titulo: titulo.to_string(),
        descripcion: Some("Cerradura mecánica".to_string()),
        precio: 20.0,
        stock: 10.0,
        categoria: "Cerradura".to_string(),
    }
}

#[tokio::test]
async fn test_create_round_trips_fields() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("create_round_trip");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    let titulo = builder.name("producto", "main");
    let created = service
        .create(create_input(&format!("  {titulo}  ")))
        .await
        .unwrap();

    assert_object_id(&created.id, "created id");
    assert_eq!(created.titulo, titulo);
    assert_eq!(created.descripcion.as_deref(), Some("Cerradura mecánica"));
    assert_eq!(created.precio, 20.0);
    assert_eq!(created.stock, 10.0);
    assert_eq!(created.categoria, "Cerradura");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = assert_some(service.find_one(&created.id).await.unwrap(), "find_one");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_titulo_is_rejected() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_titulo");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    let titulo = builder.name("producto", "dup");
    service.create(create_input(&titulo)).await.unwrap();

    // Trimming happens before the unique index is checked
    let err = service
        .create(create_input(&format!("{titulo} ")))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductoError::DuplicateTitulo(_)));
    assert_eq!(service.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_to_existing_titulo_is_rejected() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_titulo_update");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    let taken = builder.name("producto", "taken");
    service.create(create_input(&taken)).await.unwrap();
    let other = service
        .create(create_input(&builder.name("producto", "other")))
        .await
        .unwrap();

    let err = service
        .update(
            &other.id,
            UpdateProducto {
                titulo: Some(format!(" {taken}")),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    match err {
        ProductoError::DuplicateTitulo(msg) => assert!(msg.contains("METHOD: [update]")),
        other => panic!("expected DuplicateTitulo, got {other:?}"),
    }

    let unchanged = assert_some(service.find_one(&other.id).await.unwrap(), "other");
    assert_eq!(unchanged.titulo, other.titulo);
}

#[tokio::test]
async fn test_driver_duplicate_key_errors_are_classified() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_key_mapping");
    let repo = repository(&mongo, &builder).await;

    let taken = builder.name("producto", "taken");
    repo.create(create_input(&taken)).await.unwrap();

    // insert_one reports a write error
    let err = repo.create(create_input(&taken)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateKey(_)), "{err:?}");

    // find_one_and_update reports a command error
    let other = repo
        .create(create_input(&builder.name("producto", "other")))
        .await
        .unwrap();
    let id = ObjectId::parse_str(&other.id).unwrap();
    let err = repo
        .update(
            id,
            UpdateProducto {
                titulo: Some(taken),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateKey(_)), "{err:?}");
}

#[tokio::test]
async fn test_find_one_unknown_and_invalid_ids() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("find_one_ids");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    assert!(service
        .find_one("65e764e6275e99bd7b4ea435")
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        service.find_one("abc").await.unwrap_err(),
        ProductoError::InvalidId(_)
    ));
}

#[tokio::test]
async fn test_partial_update_changes_only_given_fields() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("partial_update");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    let created = service
        .create(create_input(&builder.name("producto", "upd")))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = service
        .update(
            &created.id,
            UpdateProducto {
                stock: Some(3.0),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.stock, 3.0);
    assert_eq!(updated.titulo, created.titulo);
    assert_eq!(updated.precio, created.precio);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let missing = service
        .update("65e764e6275e99bd7b4ea435", UpdateProducto::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_remove_returns_previous_state() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("remove_previous");
    let service = ProductoService::new(repository(&mongo, &builder).await);

    let created = service
        .create(create_input(&builder.name("producto", "del")))
        .await
        .unwrap();

    let removed = service.remove(&created.id).await.unwrap();
    assert_eq!(removed, Some(created.clone()));
    assert!(service.find_one(&created.id).await.unwrap().is_none());
    assert!(service.remove(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_http_create_get_delete_get() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("http_scenario");
    let app = handlers::router(ProductoService::new(repository(&mongo, &builder).await));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "titulo": "Cerradura travex",
                "descripcion": "Cerradura mecánica",
                "precio": 20,
                "stock": 10,
                "categoria": "Cerradura"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response.into_body()).await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert_object_id(&id, "created _id");

    let get = |id: &str| {
        Request::builder()
            .uri(format!("/{id}"))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(get(&id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, created);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, created);

    let response = app.oneshot(get(&id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, Value::Null);
}
