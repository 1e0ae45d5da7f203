//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProductsServiceError {
    /// Malformed listing; carries every failing field message.
    #[error("product validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    /// The actor lacks the admin standing the operation requires.
    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(_) | None => Self::Sql(error),
        }
    }
}
