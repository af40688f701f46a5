//! Axum router configuration with middleware.
//!
//! Routes live at the root (the paths are the frontend's existing contract).
//! Middleware: CORS, request tracing. Unknown paths get the
//! `Invalid endpoint` envelope with a 404.

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Conversations
        .route(
            "/conversations/start",
            post(handlers::conversation::start_conversation),
        )
        .route(
            "/conversations/send",
            post(handlers::conversation::send_message),
        )
        .route(
            "/conversations/messages",
            get(handlers::conversation::session_messages),
        )
        .route(
            "/conversations/all",
            get(handlers::conversation::all_conversations),
        )
        .route(
            "/conversations/by-id",
            get(handlers::conversation::messages_by_id),
        )
        .route("/conversations/reply", post(handlers::conversation::reply))
        .route(
            "/conversations/cleanup",
            post(handlers::conversation::cleanup),
        )
        // Catalog
        .route("/products", get(handlers::catalog::list_products))
        .route(
            "/products/cheapest",
            get(handlers::catalog::cheapest_products),
        )
        .route(
            "/products/fastest",
            get(handlers::catalog::fastest_products),
        )
        .route("/products/best", get(handlers::catalog::best_products))
        .route("/products/add", post(handlers::catalog::add_product))
        .route("/products/delete", post(handlers::catalog::delete_product))
        .route(
            "/products/update-stock",
            post(handlers::catalog::update_stock),
        )
        // Chatbot
        .route("/chat", post(handlers::chat::chat))
        // Cart
        .route("/cart", get(handlers::cart::get_cart))
        .route("/cart/add", post(handlers::cart::add_to_cart))
        .route("/cart/remove", post(handlers::cart::remove_from_cart))
        .route(
            "/cart/clear",
            post(handlers::cart::clear_cart).delete(handlers::cart::clear_cart),
        )
        // Health
        .route("/health", get(health_check))
        .fallback(unknown_endpoint)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Any unrouted path. The body shape is the frontend's existing contract;
/// the status is an honest 404 rather than the success-shaped 200 it once was.
async fn unknown_endpoint(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": format!("Invalid endpoint: {}", uri.path()),
        })),
    )
}
