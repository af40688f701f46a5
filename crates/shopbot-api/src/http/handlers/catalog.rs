//! Product catalog HTTP handlers.
//!
//! Endpoints:
//! - GET  /products              - Full catalog
//! - GET  /products/cheapest     - Price ascending
//! - GET  /products/fastest      - Delivery days ascending for a warehouse
//! - GET  /products/best         - Rating descending
//! - POST /products/add          - Insert a product
//! - POST /products/delete       - Remove a product (idempotent)
//! - POST /products/update-stock - Set a product's stock level

use axum::extract::{Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use shopbot_types::product::{NewProduct, Product};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for the capped product listings.
#[derive(Debug, Deserialize, Default)]
pub struct ProductListQuery {
    pub limit: Option<i64>,
    /// Warehouse filter; only meaningful for /products/fastest.
    pub location: Option<String>,
}

/// Body for POST /products/add. Everything the original form sends;
/// missing numeric fields are a validation error, not a silent default.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(alias = "deliveryDays")]
    pub delivery_days: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub stock: i64,
}

/// GET /products - Full catalog, id-ascending.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = state.catalog_service.list_all().await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/cheapest - Price ascending, default limit 3.
pub async fn cheapest_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = state.catalog_service.cheapest(query.limit).await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/fastest - Delivery days ascending from a warehouse.
pub async fn fastest_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = state
        .catalog_service
        .fastest_delivery(query.location.as_deref(), query.limit)
        .await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/best - Rating descending, default limit 3.
pub async fn best_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = state.catalog_service.best_rated(query.limit).await?;
    Ok(ApiResponse::success(products))
}

/// POST /products/add - Insert a new product.
pub async fn add_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let new_product = validate_new_product(body)?;
    let created = state.catalog_service.create(new_product).await?;

    Ok(ApiResponse::ok()
        .with_message("Product added successfully")
        .with_field("productId", created.id))
}

/// POST /products/delete - Remove by id; absent ids succeed too.
pub async fn delete_product(
    State(state): State<AppState>,
    Json(body): Json<DeleteProductRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state.catalog_service.delete(body.product_id).await?;
    Ok(ApiResponse::ok().with_message("Product deleted successfully"))
}

/// POST /products/update-stock - Set stock; 404 on an unknown id.
pub async fn update_stock(
    State(state): State<AppState>,
    Json(body): Json<UpdateStockRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state
        .catalog_service
        .update_stock(body.product_id, body.stock)
        .await?;
    Ok(ApiResponse::ok().with_message("Stock updated successfully"))
}

/// Field-level presence checks for product creation.
fn validate_new_product(body: CreateProductRequest) -> Result<NewProduct, AppError> {
    fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
        value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
    }

    Ok(NewProduct {
        name: required(body.name, "name")?,
        price: required(body.price, "price")?,
        image: body.image.unwrap_or_default(),
        category: body.category.unwrap_or_default(),
        rating: required(body.rating, "rating")?,
        reviews: required(body.reviews, "reviews")?,
        warehouse: body.warehouse.unwrap_or_default(),
        delivery_days: required(body.delivery_days, "delivery_days")?,
        stock: required(body.stock, "stock")?,
    })
}
