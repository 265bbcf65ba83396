use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// SQLite reports lock contention past `busy_timeout` as an unclassified
/// database error; only the message tells it apart.
fn is_lock_contention(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database is busy")
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => RepositoryError::ConstraintViolation(
                        format!("Unique constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::ConstraintViolation(
                        format!("Foreign key constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::NotNullViolation => RepositoryError::ConstraintViolation(
                        format!("Not null constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::CheckViolation => RepositoryError::ConstraintViolation(
                        format!("Check constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::ClosedConnection => RepositoryError::ConnectionError(
                        format!("Connection closed: {message}"),
                    ),
                    _ if is_lock_contention(&message) => {
                        RepositoryError::ConnectionError(format!("Store busy: {message}"))
                    }
                    _ => RepositoryError::DatabaseError(message),
                }
            }

            DieselError::SerializationError(e) => {
                RepositoryError::ValidationError(format!("Serialization error: {e}"))
            }

            // Stored rows that fail to decode are corrupt data, not bad input.
            DieselError::DeserializationError(e) => {
                RepositoryError::Unexpected(format!("Deserialization error: {e}"))
            }

            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("Query builder error: {e}"))
            }

            DieselError::RollbackTransaction => {
                RepositoryError::DatabaseError("Transaction rollback".to_string())
            }

            DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError("Broken transaction manager".to_string())
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn lock_contention_maps_to_connection_error() {
        for message in ["database is locked", "database is busy"] {
            assert!(matches!(
                RepositoryError::from(database_error(DatabaseErrorKind::Unknown, message)),
                RepositoryError::ConnectionError(_)
            ));
        }
    }

    #[test]
    fn other_unknown_errors_stay_database_errors() {
        assert!(matches!(
            RepositoryError::from(database_error(DatabaseErrorKind::Unknown, "disk I/O error")),
            RepositoryError::DatabaseError(_)
        ));
    }

    #[test]
    fn foreign_key_maps_to_constraint_violation() {
        assert!(matches!(
            RepositoryError::from(database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                "FOREIGN KEY constraint failed"
            )),
            RepositoryError::ConstraintViolation(_)
        ));
    }

    #[test]
    fn undecodable_rows_are_unexpected() {
        let err = DieselError::DeserializationError("bad column".into());
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::Unexpected(_)
        ));
    }

    #[test]
    fn rollback_maps_to_database_error() {
        assert!(matches!(
            RepositoryError::from(DieselError::RollbackTransaction),
            RepositoryError::DatabaseError(_)
        ));
    }
}
