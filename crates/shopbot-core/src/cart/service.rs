//! Cart service: session-scoped line items over the cart and catalog ports.

use rust_decimal::Decimal;
use shopbot_types::cart::{CartItem, CartView};
use shopbot_types::error::CartError;
use shopbot_types::product::Product;
use tracing::info;

use crate::cart::repository::CartRepository;
use crate::catalog::repository::CatalogRepository;

/// Stateless cart orchestration.
///
/// Needs the catalog port as well: `add` verifies the product exists before
/// touching the cart, and the joined view is priced from product rows.
pub struct CartService<C: CartRepository, P: CatalogRepository> {
    cart_repo: C,
    catalog_repo: P,
}

impl<C: CartRepository, P: CatalogRepository> CartService<C, P> {
    pub fn new(cart_repo: C, catalog_repo: P) -> Self {
        Self {
            cart_repo,
            catalog_repo,
        }
    }

    /// The full cart for a session: items, total, and line count.
    ///
    /// The total is exact Decimal arithmetic over price x quantity,
    /// rounded to two decimal places. An empty cart totals zero.
    pub async fn get(&self, session_id: &str) -> Result<CartView, CartError> {
        let items = self.cart_repo.items(session_id).await?;
        let total = Self::sum(&items);
        Ok(CartView {
            count: items.len(),
            total,
            items,
        })
    }

    /// Add `quantity` of a product to the session's cart.
    ///
    /// Upsert-with-increment: a repeat add bumps the existing line. Returns
    /// the product (for the confirmation message) and the new line count.
    pub async fn add(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<(Product, usize), CartError> {
        let product = self
            .catalog_repo
            .get(product_id)
            .await
            .map_err(|e| CartError::Storage(e.to_string()))?
            .ok_or(CartError::ProductNotFound)?;

        let quantity = quantity.max(1);
        self.cart_repo
            .upsert_line(session_id, product_id, quantity)
            .await?;

        let count = self.cart_repo.items(session_id).await?.len();
        info!(session_id, product_id, quantity, "Added to cart");
        Ok((product, count))
    }

    /// Remove a line by its cart id, only if it belongs to the session.
    pub async fn remove(&self, session_id: &str, cart_id: i64) -> Result<(), CartError> {
        self.cart_repo.remove(session_id, cart_id).await?;
        Ok(())
    }

    /// Empty the session's cart.
    pub async fn clear(&self, session_id: &str) -> Result<(), CartError> {
        self.cart_repo.clear(session_id).await?;
        info!(session_id, "Cart cleared");
        Ok(())
    }

    /// Sum of price x quantity across the session's lines; zero when empty.
    pub async fn total(&self, session_id: &str) -> Result<Decimal, CartError> {
        let items = self.cart_repo.items(session_id).await?;
        Ok(Self::sum(&items))
    }

    fn sum(items: &[CartItem]) -> Decimal {
        items
            .iter()
            .map(CartItem::subtotal)
            .sum::<Decimal>()
            .round_dp(2)
    }
}
