//! Shopping cart types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// A cart line joined with its product, as returned by the cart endpoints.
///
/// `cart_id` identifies the line itself (for removal); the product fields are
/// flattened alongside it, matching the denormalized rows the storefront
/// renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_id: i64,
    pub quantity: i64,
    #[serde(flatten)]
    pub product: Product,
}

impl CartItem {
    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The full cart view for a session: lines, grand total, and line count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub count: usize,
}
