//! In-process implementations of the store and directory traits, used by
//! tests and for running the service without MongoDB.

use crate::error::OrderError;
use crate::models::{Order, ProductRecord, StatusChange, UserRecord};
use crate::services::directory::{ProductCatalog, UserDirectory};
use crate::services::store::OrderStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    async fn newest_first<F>(&self, predicate: F) -> Vec<Order>
    where
        F: Fn(&Order) -> bool,
    {
        let orders = self.orders.read().await;
        // Walk newest insertion first so equal timestamps still come out newest first
        let mut matching: Vec<Order> = orders
            .iter()
            .rev()
            .filter(|order| predicate(order))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().await;
        if orders
            .iter()
            .any(|o| o.id == order.id || o.order_number == order.order_number)
        {
            return Err(OrderError::PersistenceFailure(anyhow::anyhow!(
                "Duplicate order {}",
                order.order_number
            )));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.newest_first(|o| o.user == user_id).await)
    }

    async fn find_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.newest_first(|o| o.has_seller(seller_id)).await)
    }

    async fn apply_status_change(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<Option<Order>, OrderError> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.apply_status_change(change);
        Ok(Some(order.clone()))
    }

    async fn ping(&self) -> Result<(), OrderError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<String, ProductRecord>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, product: ProductRecord) {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
    }

    pub async fn remove(&self, id: &str) {
        self.products.write().await.remove(id);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_products(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, ProductRecord>, OrderError> {
        let products = self.products.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, OrderError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_users(&self, ids: &[String]) -> Result<HashMap<String, UserRecord>, OrderError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|u| (id.clone(), u.clone())))
            .collect())
    }
}
