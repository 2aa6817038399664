//! Common error types for staffbook

use thiserror::Error;

/// Common result type for staffbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across staffbook crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A write collided with a UNIQUE constraint
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A write referenced a row that does not exist
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for either kind of store-level constraint rejection
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Error::UniqueViolation(_) | Error::ForeignKeyViolation(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Error::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Error::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        Error::Database(err)
    }
}
