//! # Warehouse Error Infrastructure
//!
//! Error types shared by every crate of the warehouse backend.

pub mod traits;

pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message:   String,
        /// Whether the caller may retry the operation unchanged (lost a
        /// serialization race rather than hit a permanent constraint).
        retryable: bool,
    },

    #[error("TransactionFailure: {message}")]
    TransactionFailure {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl ToString) -> Self {
        Self::NotFound {
            message: resource.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create a conflict error caused by a permanent constraint.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message:   message.to_string(),
            retryable: false,
        }
    }

    /// Create a conflict error the caller may retry.
    #[inline]
    pub fn retryable_conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message:   message.to_string(),
            retryable: true,
        }
    }

    /// Create a transaction failure error.
    #[inline]
    pub fn transaction_failure(message: impl ToString) -> Self {
        Self::TransactionFailure {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code a web layer should answer with.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::TransactionFailure {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::TransactionFailure {
                ..
            } => "TRANSACTION_FAILURE",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound {
                message,
            } |
            AppError::BadRequest {
                message,
            } |
            AppError::Conflict {
                message,
                ..
            } |
            AppError::TransactionFailure {
                message,
            } |
            AppError::Internal {
                message,
            } |
            AppError::Database {
                message,
            } |
            AppError::Io {
                message,
            } |
            AppError::Config {
                message,
            } |
            AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Whether the failed operation can be retried unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Conflict {
                retryable: true,
                ..
            }
        )
    }

    /// Add context to the error.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let context_msg = context.to_string();
        let prefixed = |message: String| format!("{}: {}", context_msg, message);
        match self {
            AppError::NotFound {
                message,
            } => {
                Self::NotFound {
                    message: prefixed(message),
                }
            },
            AppError::BadRequest {
                message,
            } => {
                Self::BadRequest {
                    message: prefixed(message),
                }
            },
            AppError::Conflict {
                message,
                retryable,
            } => {
                Self::Conflict {
                    message: prefixed(message),
                    retryable,
                }
            },
            AppError::TransactionFailure {
                message,
            } => {
                Self::TransactionFailure {
                    message: prefixed(message),
                }
            },
            AppError::Internal {
                message,
            } => {
                Self::Internal {
                    message: prefixed(message),
                }
            },
            AppError::Database {
                message,
            } => {
                Self::Database {
                    message: prefixed(message),
                }
            },
            AppError::Io {
                message,
            } => {
                Self::Io {
                    message: prefixed(message),
                }
            },
            AppError::Config {
                message,
            } => {
                Self::Config {
                    message: prefixed(message),
                }
            },
            AppError::Migration {
                message,
            } => {
                Self::Migration {
                    message: prefixed(message),
                }
            },
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert serde_json errors to AppError.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
///
/// Constraint violations become non-retryable conflicts; lost serialization
/// races and lock timeouts become retryable conflicts.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(message)) => {
                return Self::conflict(format!("foreign key constraint violated: {}", message));
            },
            Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) => {
                return Self::conflict(format!("unique constraint violated: {}", message));
            },
            _ => {},
        }

        let message = err.to_string();
        if is_serialization_failure(&message) {
            return Self::retryable_conflict(message);
        }

        Self::Database {
            message,
        }
    }
}

/// Detect lost transaction races reported by PostgreSQL or SQLite.
fn is_serialization_failure(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ["could not serialize access", "deadlock detected", "database is locked", "lock timeout"]
        .iter()
        .any(|needle| lowered.contains(needle))
}
