//! SQLite catalog repository implementation.
//!
//! Implements `CatalogRepository` from `shopbot-core` using sqlx with the
//! split read/write pools: raw queries, a private Row struct for
//! SQLite-to-domain mapping.

use rust_decimal::Decimal;
use shopbot_core::catalog::repository::CatalogRepository;
use shopbot_types::error::RepositoryError;
use shopbot_types::product::{NewProduct, Product};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CatalogRepository`.
pub struct SqliteCatalogRepository {
    pool: DatabasePool,
}

impl SqliteCatalogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_products(&self, sql: &str, binds: &[&str]) -> Result<Vec<Product>, RepositoryError> {
        let mut query = sqlx::query(sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            let product_row =
                ProductRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            products.push(product_row.into_product()?);
        }
        Ok(products)
    }
}

/// Internal row type for mapping SQLite rows to domain Product.
pub(crate) struct ProductRow {
    id: i64,
    name: String,
    price: String,
    image: String,
    category: String,
    rating: f64,
    reviews: i64,
    warehouse: String,
    delivery_days: i64,
    stock: i64,
}

impl ProductRow {
    pub(crate) fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            image: row.try_get("image")?,
            category: row.try_get("category")?,
            rating: row.try_get("rating")?,
            reviews: row.try_get("reviews")?,
            warehouse: row.try_get("warehouse")?,
            delivery_days: row.try_get("delivery_days")?,
            stock: row.try_get("stock")?,
        })
    }

    pub(crate) fn into_product(self) -> Result<Product, RepositoryError> {
        let price: Decimal = self
            .price
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid price: {e}")))?;

        Ok(Product {
            id: self.id,
            name: self.name,
            price,
            image: self.image,
            category: self.category,
            rating: self.rating,
            reviews: self.reviews,
            warehouse: self.warehouse,
            delivery_days: self.delivery_days,
            stock: self.stock,
        })
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_products("SELECT * FROM products ORDER BY id", &[])
            .await
    }

    async fn cheapest(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        // price is stored as decimal TEXT; CAST gives numeric ordering.
        let sql = format!(
            "SELECT * FROM products ORDER BY CAST(price AS REAL) ASC LIMIT {limit}"
        );
        self.fetch_products(&sql, &[]).await
    }

    async fn fastest_delivery(
        &self,
        location: &str,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT * FROM products WHERE warehouse = ? ORDER BY delivery_days ASC LIMIT {limit}"
        );
        self.fetch_products(&sql, &[location]).await
    }

    async fn best_rated(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT * FROM products ORDER BY rating DESC LIMIT {limit}");
        self.fetch_products(&sql, &[]).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", term.to_lowercase());
        self.fetch_products(
            "SELECT * FROM products WHERE LOWER(name) LIKE ? OR LOWER(category) LIKE ? ORDER BY id",
            &[&pattern, &pattern],
        )
        .await
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_products(
            "SELECT * FROM products WHERE category = ? ORDER BY id",
            &[category],
        )
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let product_row = ProductRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(product_row.into_product()?))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO products (name, price, image, category, rating, reviews, warehouse, delivery_days, stock)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(&product.image)
        .bind(&product.category)
        .bind(product.rating)
        .bind(product.reviews)
        .bind(&product.warehouse)
        .bind(product.delivery_days)
        .bind(product.stock)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            rating: product.rating,
            reviews: product.reviews,
            warehouse: product.warehouse.clone(),
            delivery_days: product.delivery_days,
            stock: product.stock,
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // Deliberately ignores rows_affected: deleting an absent id succeeds.
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn update_stock(&self, id: i64, stock: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET stock = ? WHERE id = ?")
            .bind(stock)
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
