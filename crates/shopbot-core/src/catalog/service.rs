//! Catalog service: list/filter/search queries and catalog management.

use rust_decimal::Decimal;
use shopbot_types::error::CatalogError;
use shopbot_types::product::{NewProduct, Product};
use tracing::info;

use crate::catalog::repository::CatalogRepository;

/// Default row cap for the cheapest/fastest/best listings.
pub const DEFAULT_LIMIT: i64 = 3;

/// Warehouse used for delivery-time queries when none is given.
pub const DEFAULT_LOCATION: &str = "Cikarang";

/// Stateless orchestration over a [`CatalogRepository`].
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All products, id-ascending.
    pub async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.repo.list_all().await?)
    }

    /// Cheapest products first; `limit` defaults to 3.
    pub async fn cheapest(&self, limit: Option<i64>) -> Result<Vec<Product>, CatalogError> {
        Ok(self.repo.cheapest(limit.unwrap_or(DEFAULT_LIMIT)).await?)
    }

    /// Fastest delivery from `location` (defaults to the Cikarang warehouse).
    pub async fn fastest_delivery(
        &self,
        location: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, CatalogError> {
        let location = location.unwrap_or(DEFAULT_LOCATION);
        Ok(self
            .repo
            .fastest_delivery(location, limit.unwrap_or(DEFAULT_LIMIT))
            .await?)
    }

    /// Best-rated products first; `limit` defaults to 3.
    pub async fn best_rated(&self, limit: Option<i64>) -> Result<Vec<Product>, CatalogError> {
        Ok(self.repo.best_rated(limit.unwrap_or(DEFAULT_LIMIT)).await?)
    }

    /// Case-insensitive substring search on name or category.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.repo.search(term).await?)
    }

    /// Exact category listing.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.repo.by_category(category).await?)
    }

    /// Single product lookup.
    pub async fn get(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        Ok(self.repo.get(id).await?)
    }

    /// Insert a new product after validating its numeric fields.
    pub async fn create(&self, product: NewProduct) -> Result<Product, CatalogError> {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Validation("name must not be empty".into()));
        }
        if product.price < Decimal::ZERO {
            return Err(CatalogError::Validation("price must not be negative".into()));
        }
        if product.delivery_days < 0 {
            return Err(CatalogError::Validation(
                "delivery_days must not be negative".into(),
            ));
        }
        if product.stock < 0 {
            return Err(CatalogError::Validation("stock must not be negative".into()));
        }

        let created = self.repo.create(&product).await?;
        info!(product_id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Delete by id. Deleting an absent id is a successful no-op.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.repo.delete(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Set stock for a product; reports `NotFound` for an absent id.
    pub async fn update_stock(&self, id: i64, stock: i64) -> Result<(), CatalogError> {
        if stock < 0 {
            return Err(CatalogError::Validation("stock must not be negative".into()));
        }
        self.repo.update_stock(id, stock).await?;
        info!(product_id = id, stock, "Stock updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::test_support::StubCatalog;

    fn product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: "10.00".parse().unwrap(),
            image: String::new(),
            category: "electronics".to_string(),
            rating: 4.0,
            reviews: 1,
            warehouse: "Cikarang".to_string(),
            delivery_days: 2,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_negative_numbers() {
        let service = CatalogService::new(StubCatalog::empty());

        let err = service
            .create(NewProduct {
                stock: -1,
                ..product("Bad")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = service
            .create(NewProduct {
                delivery_days: -2,
                ..product("Bad")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = CatalogService::new(StubCatalog::empty());
        let err = service.create(product("   ")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let service = CatalogService::new(StubCatalog::empty());
        // Empty catalog: the interesting part is that defaults do not error.
        assert!(service.cheapest(None).await.unwrap().is_empty());
        assert!(service
            .fastest_delivery(None, None)
            .await
            .unwrap()
            .is_empty());
    }
}
