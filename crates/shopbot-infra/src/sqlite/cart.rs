//! SQLite cart repository implementation.
//!
//! The add path is a single atomic upsert: `INSERT .. ON CONFLICT .. DO
//! UPDATE` against the `(session_id, product_id)` unique key, so concurrent
//! adds can never produce two lines for the same product.

use shopbot_core::cart::repository::CartRepository;
use shopbot_types::cart::CartItem;
use shopbot_types::error::RepositoryError;
use sqlx::Row;

use super::catalog::ProductRow;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `CartRepository`.
pub struct SqliteCartRepository {
    pool: DatabasePool,
}

impl SqliteCartRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl CartRepository for SqliteCartRepository {
    async fn items(&self, session_id: &str) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT c.id AS cart_id, c.quantity,
                      p.id, p.name, p.price, p.image, p.category, p.rating,
                      p.reviews, p.warehouse, p.delivery_days, p.stock
               FROM cart c
               JOIN products p ON c.product_id = p.id
               WHERE c.session_id = ?
               ORDER BY c.id"#,
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let cart_id: i64 = row
                .try_get("cart_id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let quantity: i64 = row
                .try_get("quantity")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let product = ProductRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_product()?;
            items.push(CartItem {
                cart_id,
                quantity,
                product,
            });
        }

        Ok(items)
    }

    async fn upsert_line(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart (session_id, product_id, quantity)
               VALUES (?, ?, ?)
               ON CONFLICT (session_id, product_id)
               DO UPDATE SET quantity = quantity + excluded.quantity"#,
        )
        .bind(session_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, session_id: &str, cart_id: i64) -> Result<(), RepositoryError> {
        // Ownership is part of the predicate: a foreign cart_id is a no-op.
        sqlx::query("DELETE FROM cart WHERE id = ? AND session_id = ?")
            .bind(cart_id)
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::catalog::SqliteCatalogRepository;
    use crate::sqlite::pool::DatabasePool;
    use shopbot_core::catalog::repository::CatalogRepository;
    use shopbot_types::product::NewProduct;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_product(pool: &DatabasePool, name: &str, price: &str) -> i64 {
        let catalog = SqliteCatalogRepository::new(pool.clone());
        catalog
            .create(&NewProduct {
                name: name.to_string(),
                price: price.parse().unwrap(),
                image: String::new(),
                category: "electronics".to_string(),
                rating: 4.0,
                reviews: 5,
                warehouse: "Cikarang".to_string(),
                delivery_days: 2,
                stock: 10,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_repeat_add_increments_quantity() {
        let pool = test_pool().await;
        let repo = SqliteCartRepository::new(pool.clone());
        let product_id = seed_product(&pool, "Mouse", "12.50").await;

        repo.upsert_line("s1", product_id, 2).await.unwrap();
        repo.upsert_line("s1", product_id, 3).await.unwrap();

        let items = repo.items("s1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].product.name, "Mouse");
        assert_eq!(items[0].product.price, "12.50".parse().unwrap());
    }

    #[tokio::test]
    async fn test_items_are_session_scoped() {
        let pool = test_pool().await;
        let repo = SqliteCartRepository::new(pool.clone());
        let product_id = seed_product(&pool, "Mouse", "12.50").await;

        repo.upsert_line("alice", product_id, 1).await.unwrap();
        assert!(repo.items("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_checks_ownership() {
        let pool = test_pool().await;
        let repo = SqliteCartRepository::new(pool.clone());
        let product_id = seed_product(&pool, "Mouse", "12.50").await;

        repo.upsert_line("alice", product_id, 1).await.unwrap();
        let cart_id = repo.items("alice").await.unwrap()[0].cart_id;

        // Wrong session: nothing happens.
        repo.remove("bob", cart_id).await.unwrap();
        assert_eq!(repo.items("alice").await.unwrap().len(), 1);

        // Owner: the line goes away. Removing again is a no-op.
        repo.remove("alice", cart_id).await.unwrap();
        assert!(repo.items("alice").await.unwrap().is_empty());
        repo.remove("alice", cart_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_empties_only_this_session() {
        let pool = test_pool().await;
        let repo = SqliteCartRepository::new(pool.clone());
        let first = seed_product(&pool, "Mouse", "12.50").await;
        let second = seed_product(&pool, "Keyboard", "45.00").await;

        repo.upsert_line("alice", first, 1).await.unwrap();
        repo.upsert_line("alice", second, 2).await.unwrap();
        repo.upsert_line("bob", first, 1).await.unwrap();

        repo.clear("alice").await.unwrap();
        assert!(repo.items("alice").await.unwrap().is_empty());
        assert_eq!(repo.items("bob").await.unwrap().len(), 1);
    }
}
