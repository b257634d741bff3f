//! Order record persistence.
//!
//! Orders are single documents; every write here touches exactly one of
//! them, so atomicity comes from the store's per-document guarantees.

use crate::error::OrderError;
use crate::models::{Order, OrderStatus, StatusChange};
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, DateTime as BsonDateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Collection;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: &Order) -> Result<(), OrderError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError>;

    /// Orders owned by `user_id`, newest first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Order>, OrderError>;

    /// Orders holding at least one line item sold by `seller_id`, newest
    /// first. Whole orders are returned, other sellers' items included.
    async fn find_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, OrderError>;

    /// Append `change` to the order's history and update its status.
    /// Returns the updated order, or `None` when the id is unknown.
    async fn apply_status_change(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<Option<Order>, OrderError>;

    async fn ping(&self) -> Result<(), OrderError>;
}

#[derive(Clone)]
pub struct MongoOrderStore {
    db: MongoDb,
    orders: Collection<Order>,
}

impl MongoOrderStore {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            db: db.clone(),
            orders: db.orders(),
        }
    }

    async fn find_sorted(&self, filter: Document) -> Result<Vec<Order>, OrderError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self.orders.find(filter, options).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), OrderError> {
        self.orders.insert_one(order, None).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError> {
        let order = self.orders.find_one(doc! { "_id": id }, None).await?;
        Ok(order)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        self.find_sorted(doc! { "user": user_id }).await
    }

    async fn find_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, OrderError> {
        self.find_sorted(doc! { "items.seller": seller_id }).await
    }

    async fn apply_status_change(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<Option<Order>, OrderError> {
        let stamped_at = BsonDateTime::from_chrono(change.timestamp);

        let mut set = doc! {
            "status": to_bson(&change.status)?,
            "updatedAt": stamped_at,
        };
        if change.status == OrderStatus::Delivered {
            set.insert("deliveredAt", stamped_at);
        }

        // $set and $push in one update keeps status and history in step
        let update = doc! {
            "$set": set,
            "$push": { "statusHistory": to_bson(&change)? },
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let order = self
            .orders
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?;
        Ok(order)
    }

    async fn ping(&self) -> Result<(), OrderError> {
        self.db
            .health_check()
            .await
            .map_err(|e| OrderError::PersistenceFailure(anyhow::anyhow!(e.to_string())))
    }
}
