//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! conversions out of domain and pagination errors live here.

use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::pagination::PaginationError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::InvalidArgument(val.to_string())
    }
}

/// Raised while decoding stored rows, so the data is at fault, not the caller.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Unexpected(format!("Stored row is invalid: {val}"))
    }
}

impl From<PaginationError> for ServiceError {
    fn from(val: PaginationError) -> Self {
        ServiceError::InvalidArgument(val.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(val: ValidationErrors) -> Self {
        ServiceError::InvalidArgument(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConnectionError(message) => ServiceError::BackendUnavailable(message),
            RepositoryError::ValidationError(message) => ServiceError::InvalidArgument(message),
            RepositoryError::DatabaseError(message)
            | RepositoryError::ConstraintViolation(message)
            | RepositoryError::Unexpected(message) => ServiceError::BackendOperationFailed(message),
        }
    }
}
