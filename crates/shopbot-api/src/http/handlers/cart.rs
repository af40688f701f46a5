//! Shopping cart HTTP handlers.
//!
//! Endpoints:
//! - GET    /cart        - Items, total, and count for the caller's session
//! - POST   /cart/add    - Add a product (upsert-with-increment)
//! - POST   /cart/remove - Remove a line by its cart id
//! - POST   /cart/clear  - Empty the cart (DELETE also accepted)

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use shopbot_types::cart::CartView;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionId;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CartAddRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CartRemoveRequest {
    #[serde(rename = "cartId")]
    pub cart_id: i64,
}

/// GET /cart - The session's cart with its running total.
pub async fn get_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<ApiResponse<CartView>, AppError> {
    let view = state.cart_service.get(&session_id).await?;
    Ok(ApiResponse::success(view))
}

/// POST /cart/add - Add a product to the session's cart.
pub async fn add_to_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<CartAddRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let (product, count) = state
        .cart_service
        .add(&session_id, body.product_id, body.quantity)
        .await?;

    Ok(ApiResponse::ok()
        .with_message(format!("{} added to cart", product.name))
        .with_field("cartCount", count))
}

/// POST /cart/remove - Remove a line; foreign or absent ids are a no-op.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<CartRemoveRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state.cart_service.remove(&session_id, body.cart_id).await?;
    Ok(ApiResponse::ok().with_message("Item removed from cart"))
}

/// POST or DELETE /cart/clear - Empty the session's cart.
pub async fn clear_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<ApiResponse<()>, AppError> {
    state.cart_service.clear(&session_id).await?;
    Ok(ApiResponse::ok().with_message("Cart cleared"))
}
