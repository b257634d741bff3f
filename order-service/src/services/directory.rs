//! Read-only lookups into the product catalog and the user accounts.
//!
//! Both collections belong to other parts of the marketplace; this service
//! only resolves references for display and identifies callers.

use crate::error::OrderError;
use crate::models::{ProductRecord, UserRecord};
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;
use std::collections::HashMap;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolve the given ids. Ids with no catalog entry are absent from the map.
    async fn find_products(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, ProductRecord>, OrderError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, OrderError>;

    /// Resolve the given ids. Unknown ids are absent from the map.
    async fn find_users(&self, ids: &[String]) -> Result<HashMap<String, UserRecord>, OrderError>;
}

#[derive(Clone)]
pub struct MongoProductCatalog {
    products: Collection<ProductRecord>,
}

impl MongoProductCatalog {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            products: db.products(),
        }
    }
}

#[async_trait]
impl ProductCatalog for MongoProductCatalog {
    async fn find_products(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, ProductRecord>, OrderError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .products
            .find(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await?;
        let products: Vec<ProductRecord> = cursor.try_collect().await?;

        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }
}

#[derive(Clone)]
pub struct MongoUserDirectory {
    users: Collection<UserRecord>,
}

impl MongoUserDirectory {
    pub fn new(db: &MongoDb) -> Self {
        Self { users: db.users() }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, OrderError> {
        let user = self.users.find_one(doc! { "_id": id }, None).await?;
        Ok(user)
    }

    async fn find_users(&self, ids: &[String]) -> Result<HashMap<String, UserRecord>, OrderError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self.users.find(doc! { "_id": { "$in": ids.to_vec() } }, None).await?;
        let users: Vec<UserRecord> = cursor.try_collect().await?;

        Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
    }
}
