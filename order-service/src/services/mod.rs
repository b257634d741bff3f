pub mod database;
pub mod directory;
pub mod jwt;
pub mod memory;
pub mod metrics;
pub mod orders;
pub mod stats;
pub mod store;

pub use database::MongoDb;
pub use directory::{MongoProductCatalog, MongoUserDirectory, ProductCatalog, UserDirectory};
pub use jwt::{JwtService, SessionClaims};
pub use memory::{InMemoryOrderStore, InMemoryProductCatalog, InMemoryUserDirectory};
pub use metrics::{get_metrics, init_metrics};
pub use orders::OrderService;
pub use stats::{seller_stats, SellerStats};
pub use store::{MongoOrderStore, OrderStore};
