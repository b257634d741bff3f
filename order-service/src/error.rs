use service_core::error::AppError;
use thiserror::Error;

/// Failure kinds of the order subsystem.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid order request: {0}")]
    ValidationMissing(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(anyhow::Error),
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::PersistenceFailure(anyhow::Error::new(err))
    }
}

impl From<mongodb::bson::ser::Error> for OrderError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        OrderError::PersistenceFailure(anyhow::Error::new(err))
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::ValidationMissing(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            OrderError::NotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Order not found: {}", id))
            }
            OrderError::Unauthorized(msg) => AppError::Unauthorized(anyhow::anyhow!(msg)),
            OrderError::PersistenceFailure(e) => AppError::DatabaseError(e),
        }
    }
}
