//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, FieldError, NotFoundBody, ValidatedRequest, ValidationErrorBody,
    errors::responses::{
        InternalServerErrorResponse, InvalidJsonResponse, NotFoundResponse,
        ValidationFailedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::rules::{CreateProductRules, ProductIdRules, UpdateProductRules};
use crate::service::ProductService;

/// Body returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Product deleted";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        toggle_availability,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct,
            FieldError, ValidationErrorBody, NotFoundBody, ErrorResponse
        ),
        responses(
            ValidationFailedResponse,
            InvalidJsonResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products::<R>).post(create_product::<R>))
        .route(
            "/{id}",
            get(get_product::<R>)
                .put(update_product::<R>)
                .patch(toggle_availability::<R>)
                .delete(delete_product::<R>),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, ascending by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
///
/// New products are always available.
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedRequest(input): ValidatedRequest<CreateProductRules>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedRequest(id): ValidatedRequest<ProductIdRules>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's name, price and availability
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedRequest((id, input)): ValidatedRequest<UpdateProductRules>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Flip a product's availability
///
/// Takes no body; the new value is the negation of the stored one.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = Product),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedRequest(id): ValidatedRequest<ProductIdRules>,
) -> ProductResult<Json<Product>> {
    let product = service.toggle_availability(id).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = String),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedRequest(id): ValidatedRequest<ProductIdRules>,
) -> ProductResult<Json<&'static str>> {
    service.delete_product(id).await?;
    Ok(Json(DELETED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(repo: MockProductRepository, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = router(ProductService::new(repo));
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_id_never_reaches_store() {
        let cases = [
            (Method::GET, json!(null)),
            (Method::PATCH, json!(null)),
            (Method::DELETE, json!(null)),
            (Method::PUT, json!({"name": "Mouse", "price": 30, "availability": true})),
        ];

        for (method, body) in cases {
            // A mock without expectations panics on any call
            let (status, response) =
                send(MockProductRepository::new(), method.clone(), "/abc", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(response["errors"][0], json!({"field": "id", "message": "Invalid ID"}));
        }
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let (status, body) = send(
            MockProductRepository::new(),
            Method::POST,
            "/",
            json!({"name": "", "price": -5}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [
                {"field": "name", "message": "Product name is required"},
                {"field": "price", "message": "Invalid price"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_patch_on_missing_product_does_not_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update_by_id().never();

        let (status, body) = send(repo, Method::PATCH, "/42", json!(null)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Product Not Found"}));
    }

    #[tokio::test]
    async fn test_storage_fault_is_500() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all()
            .returning(|| Err(ProductError::Database("connection reset".to_string())));

        let (status, body) = send(repo, Method::GET, "/", json!(null)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|input| input.name == "Monitor" && input.price == 300.0)
            .returning(|input| {
                Ok(Product {
                    id: 1,
                    name: input.name,
                    price: input.price,
                    availability: true,
                })
            });

        let (status, body) = send(repo, Method::POST, "/", json!({"name": "Monitor", "price": 300})).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"id": 1, "name": "Monitor", "price": 300.0, "availability": true})
        );
    }

    #[test]
    fn test_openapi_documents_all_routes() {
        let doc = ApiDoc::openapi();
        let item = &doc.paths.paths["/{id}"];
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }
}
