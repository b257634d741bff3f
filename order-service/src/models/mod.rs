pub mod directory;
pub mod order;

pub use directory::{ProductRecord, UserRecord};
pub use order::{BuyerInfo, LineItem, Order, OrderStatus, PaymentMethod, StatusChange};
