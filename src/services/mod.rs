//! The catalog query engine.
//!
//! Service functions are stateless and generic over the narrow repository
//! capability they need, so a caller that only lists brands depends only on
//! [`crate::repository::BrandReader`].

use thiserror::Error;

pub mod brands;
pub mod products;
pub mod types;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed request parameters; the backend was not queried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found")]
    NotFound,

    /// The store could not be reached.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The store was reached but rejected or failed the operation.
    #[error("Backend operation failed: {0}")]
    BackendOperationFailed(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
