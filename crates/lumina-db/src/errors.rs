use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::fmt::Display;
use thiserror::Error;

/// Error type for database pool initialization
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("cannot init database pool : {0}")]
    Pool(String),
    #[error("cannot run database migrations : {0}")]
    Migration(String),
}

/// Database error carrying the operation it happened in
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to get connection from pool for operation '{operation}': {message}")]
    PoolError { operation: String, message: String },

    #[error("Database interaction failed for operation '{operation}': {message}")]
    InteractionError { operation: String, message: String },

    #[error("Record not found in operation '{operation}'")]
    NotFound { operation: String },

    #[error("Database query error in operation '{operation}': {message}")]
    QueryError { operation: String, message: String },

    #[error("Unique constraint violation in operation '{operation}': {message}")]
    UniqueViolation { operation: String, message: String },

    #[error("Foreign key constraint violation in operation '{operation}': {message}")]
    ForeignKeyViolation { operation: String, message: String },
}

impl DatabaseError {
    pub fn not_found(operation: impl Display) -> Self {
        Self::NotFound {
            operation: operation.to_string(),
        }
    }

    pub fn query_error(operation: impl Display, message: impl Display) -> Self {
        Self::QueryError {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Replaces the operation context, used once the caller knows what it was doing.
    #[must_use]
    pub fn with_operation(self, operation: impl Display) -> Self {
        let operation = operation.to_string();
        match self {
            Self::PoolError { message, .. } => Self::PoolError { operation, message },
            Self::InteractionError { message, .. } => Self::InteractionError { operation, message },
            Self::NotFound { .. } => Self::NotFound { operation },
            Self::QueryError { message, .. } => Self::QueryError { operation, message },
            Self::UniqueViolation { message, .. } => Self::UniqueViolation { operation, message },
            Self::ForeignKeyViolation { message, .. } => {
                Self::ForeignKeyViolation { operation, message }
            }
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            Self::PoolError { operation, .. }
            | Self::InteractionError { operation, .. }
            | Self::NotFound { operation }
            | Self::QueryError { operation, .. }
            | Self::UniqueViolation { operation, .. }
            | Self::ForeignKeyViolation { operation, .. } => operation,
        }
    }
}

impl From<DieselError> for DatabaseError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound {
                operation: "unknown".to_string(),
            },
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    operation: "unknown".to_string(),
                    message: info.message().to_string(),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation {
                    operation: "unknown".to_string(),
                    message: info.message().to_string(),
                }
            }
            other => Self::QueryError {
                operation: "unknown".to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: DatabaseError = DieselError::NotFound.into();
        assert!(err.is_not_found());
        assert_eq!(err.operation(), "unknown");
    }

    #[test]
    fn test_with_operation_keeps_variant_and_message() {
        let err = DatabaseError::query_error("unknown", "boom").with_operation("save chains");
        assert_eq!(err.operation(), "save chains");
        match err {
            DatabaseError::QueryError { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected variant: {other:?}"),
        }

        let err = DatabaseError::not_found("x").with_operation("find chain Ethereum");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Record not found in operation 'find chain Ethereum'"
        );
    }
}
