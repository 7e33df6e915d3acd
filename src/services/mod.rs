use thiserror::Error;

use crate::repository::RepositoryError;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod favorites;
pub mod orders;
pub mod products;
pub mod users;

/// Result type returned by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the business layer, mapped onto HTTP statuses by the
/// routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No valid principal. Maps to 401.
    #[error("authentication required")]
    Unauthorized,
    /// Principal lacks the required role. Maps to 403.
    #[error("admin access required")]
    Forbidden,
    /// The targeted entity does not exist. Maps to 404.
    #[error("not found")]
    NotFound,
    /// Request payload failed validation. Maps to 400.
    #[error("{0}")]
    Form(String),
    /// A cart quantity would exceed the product's current stock. Maps to
    /// 400 with the max echoed back.
    #[error("quantity limit exceeded, {max} available")]
    StockLimit { max: i32 },
    /// A unique constraint rejected the write. Maps to 409.
    #[error("{0}")]
    Conflict(String),
    /// Failed to deliver a password-reset email. Maps to 500.
    #[error("failed to send email")]
    Mailer(String),
    /// Password hashing or token signing failed. Maps to 500.
    #[error("internal error")]
    Internal(String),
    /// Persistence failure. Maps to 500 with a generic body; the details
    /// stay in the server log.
    #[error("internal error")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            other => ServiceError::Repository(other),
        }
    }
}
