//! CatalogRepository trait definition.
//!
//! Read-mostly queries over the products table, plus the three
//! catalog-management mutations. Uses native async fn in traits (RPITIT,
//! Rust 2024 edition); implementations live in shopbot-infra.

use shopbot_types::error::RepositoryError;
use shopbot_types::product::{NewProduct, Product};

/// Repository trait for product catalog persistence.
pub trait CatalogRepository: Send + Sync {
    /// All products, stable id-ascending order.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Products ordered by price ascending, capped at `limit`.
    fn cheapest(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Products stocked at `location`, ordered by delivery days ascending.
    fn fastest_delivery(
        &self,
        location: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Products ordered by rating descending, capped at `limit`.
    fn best_rated(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Case-insensitive substring match on name or category.
    fn search(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Products whose category matches exactly.
    fn by_category(
        &self,
        category: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Single product lookup by id.
    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Insert a new product, returning it with the assigned id.
    fn create(
        &self,
        product: &NewProduct,
    ) -> impl std::future::Future<Output = Result<Product, RepositoryError>> + Send;

    /// Delete a product by id. Succeeds even when the id is absent.
    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set the stock level of a product. `NotFound` when the id is absent.
    fn update_stock(
        &self,
        id: i64,
        stock: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
