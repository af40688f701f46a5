//! In-memory stub repositories shared by the unit tests in this crate.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use shopbot_types::cart::CartItem;
use shopbot_types::conversation::{
    Conversation, ConversationStatus, ConversationSummary, Message, SenderType,
};
use shopbot_types::error::RepositoryError;
use shopbot_types::product::{NewProduct, Product};
use uuid::Uuid;

use crate::cart::repository::CartRepository;
use crate::catalog::repository::CatalogRepository;
use crate::conversation::repository::ConversationRepository;

pub fn sample_product(id: i64, name: &str, price: &str, rating: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: price.parse().unwrap(),
        image: String::new(),
        category: "electronics".to_string(),
        rating,
        reviews: 10,
        warehouse: "Cikarang".to_string(),
        delivery_days: id,
        stock: 10,
    }
}

/// Catalog port over a shared in-memory product list.
#[derive(Clone)]
pub struct StubCatalog {
    products: Arc<Mutex<Vec<Product>>>,
    fail: bool,
}

impl StubCatalog {
    pub fn empty() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            fail: false,
        }
    }

    /// Every operation returns a storage error.
    pub fn failing() -> Self {
        Self {
            products: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Query("stub failure".to_string()));
        }
        Ok(self.products.lock().unwrap().clone())
    }
}

impl CatalogRepository for StubCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn cheapest(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.sort_by(|a, b| a.price.cmp(&b.price));
        products.truncate(limit as usize);
        Ok(products)
    }

    async fn fastest_delivery(
        &self,
        location: &str,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.retain(|p| p.warehouse == location);
        products.sort_by_key(|p| p.delivery_days);
        products.truncate(limit as usize);
        Ok(products)
    }

    async fn best_rated(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        products.truncate(limit as usize);
        Ok(products)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let term = term.to_lowercase();
        let mut products = self.all()?;
        products.retain(|p| {
            p.name.to_lowercase().contains(&term) || p.category.to_lowercase().contains(&term)
        });
        Ok(products)
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.retain(|p| p.category == category);
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Query("stub failure".to_string()));
        }
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created = Product {
            id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            rating: product.rating,
            reviews: product.reviews,
            warehouse: product.warehouse.clone(),
            delivery_days: product.delivery_days,
            stock: product.stock,
        };
        products.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Query("stub failure".to_string()));
        }
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn update_stock(&self, id: i64, stock: i64) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Query("stub failure".to_string()));
        }
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.stock = stock;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Cart port over in-memory lines, resolving products via a shared catalog.
pub struct StubCart {
    catalog: StubCatalog,
    lines: Mutex<Vec<(i64, String, i64, i64)>>,
    next_id: AtomicI64,
}

impl StubCart {
    pub fn over(catalog: StubCatalog) -> Self {
        Self {
            catalog,
            lines: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl CartRepository for StubCart {
    async fn items(&self, session_id: &str) -> Result<Vec<CartItem>, RepositoryError> {
        let products = self.catalog.all()?;
        let lines = self.lines.lock().unwrap();
        Ok(lines
            .iter()
            .filter(|(_, session, _, _)| session == session_id)
            .filter_map(|(cart_id, _, product_id, quantity)| {
                products.iter().find(|p| p.id == *product_id).map(|p| CartItem {
                    cart_id: *cart_id,
                    quantity: *quantity,
                    product: p.clone(),
                })
            })
            .collect())
    }

    async fn upsert_line(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        let mut lines = self.lines.lock().unwrap();
        match lines
            .iter_mut()
            .find(|(_, session, pid, _)| session == session_id && *pid == product_id)
        {
            Some(line) => line.3 += quantity,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                lines.push((id, session_id.to_string(), product_id, quantity));
            }
        }
        Ok(())
    }

    async fn remove(&self, session_id: &str, cart_id: i64) -> Result<(), RepositoryError> {
        self.lines
            .lock()
            .unwrap()
            .retain(|(id, session, _, _)| !(*id == cart_id && session == session_id));
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<(), RepositoryError> {
        self.lines
            .lock()
            .unwrap()
            .retain(|(_, session, _, _)| session != session_id);
        Ok(())
    }
}

/// Conversation port stub for sweeper tests: `delete_older_than` either
/// reports a fixed count or fails.
pub struct CountingConversations {
    deleted: Option<u64>,
}

impl CountingConversations {
    pub fn deleting(count: u64) -> Self {
        Self {
            deleted: Some(count),
        }
    }

    pub fn failing() -> Self {
        Self { deleted: None }
    }
}

impl ConversationRepository for CountingConversations {
    async fn rotate_active(&self, session_id: &str) -> Result<Conversation, RepositoryError> {
        let now = Utc::now();
        Ok(Conversation {
            id: Uuid::now_v7(),
            session_id: session_id.to_string(),
            status: ConversationStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn append_message(
        &self,
        _conversation_id: &Uuid,
        _sender: SenderType,
        _text: &str,
    ) -> Result<Message, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    async fn messages(
        &self,
        _conversation_id: &Uuid,
        _limit: i64,
    ) -> Result<Vec<Message>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn active_with_messages(&self) -> Result<Vec<ConversationSummary>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn find_active_by_session(
        &self,
        _session_id: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        Ok(None)
    }

    async fn delete_older_than(&self, _cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        match self.deleted {
            Some(count) => Ok(count),
            None => Err(RepositoryError::Query("stub failure".to_string())),
        }
    }
}
