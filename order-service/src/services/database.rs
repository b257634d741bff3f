use crate::models::{Order, ProductRecord, UserRecord};
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for order-service");

        // Buyer history: newest first per user
        let buyer_index = IndexModel::builder()
            .keys(doc! { "user": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("buyer_orders_lookup".to_string())
                    .build(),
            )
            .build();

        // Seller view and earnings scan match on the line-item seller snapshot
        let seller_index = IndexModel::builder()
            .keys(doc! { "items.seller": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("seller_orders_lookup".to_string())
                    .build(),
            )
            .build();

        let order_number_index = IndexModel::builder()
            .keys(doc! { "orderNumber": 1 })
            .options(
                IndexOptions::builder()
                    .name("order_number_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.orders()
            .create_indexes([buyer_index, seller_index, order_number_index], None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create indexes on orders collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created indexes on orders.(user), orders.(items.seller), orders.(orderNumber)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn orders(&self) -> Collection<Order> {
        self.db.collection("orders")
    }

    pub fn products(&self) -> Collection<ProductRecord> {
        self.db.collection("products")
    }

    pub fn users(&self) -> Collection<UserRecord> {
        self.db.collection("users")
    }
}
