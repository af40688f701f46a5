//! CartRepository trait definition.
//!
//! Line items are keyed by `(session_id, product_id)`; a repeat add
//! increments the existing line. Ownership checks are baked into the
//! mutation predicates, so a session can never touch another session's lines.

use shopbot_types::cart::CartItem;
use shopbot_types::error::RepositoryError;

/// Repository trait for cart line persistence.
pub trait CartRepository: Send + Sync {
    /// All lines for a session, joined with product attributes.
    fn items(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CartItem>, RepositoryError>> + Send;

    /// Insert a line or increment an existing one by `quantity`, atomically.
    fn upsert_line(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a line if it exists and belongs to the session; no-op otherwise.
    fn remove(
        &self,
        session_id: &str,
        cart_id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete every line for the session.
    fn clear(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
