use crate::config::OrderConfig;
use crate::services::{
    JwtService, MongoDb, MongoOrderStore, MongoProductCatalog, MongoUserDirectory, OrderService,
    UserDirectory,
};
use crate::{build_router, AppState};
use service_core::error::AppError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Application {
    listener: TcpListener,
    router: axum::Router,
}

impl Application {
    pub async fn build(config: OrderConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let users: Arc<dyn UserDirectory> = Arc::new(MongoUserDirectory::new(&db));
        let orders = OrderService::new(
            Arc::new(MongoOrderStore::new(&db)),
            Arc::new(MongoProductCatalog::new(&db)),
            users.clone(),
        );

        let state = AppState {
            orders,
            users,
            jwt: JwtService::new(&config.auth.jwt_secret),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            listener,
            router: build_router(state),
        })
    }

    pub async fn run_until_stopped(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
