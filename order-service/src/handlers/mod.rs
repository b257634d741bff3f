pub mod health;
pub mod orders;

pub use health::{health_check, metrics_endpoint, readiness_check};
