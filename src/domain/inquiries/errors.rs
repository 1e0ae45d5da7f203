//! Inquiries service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InquiriesServiceError {
    /// Malformed submission; carries every failing field message.
    #[error("inquiry validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("inquiry already exists")]
    AlreadyExists,

    #[error("inquiry not found")]
    NotFound,

    /// The actor lacks the admin standing the operation requires.
    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InquiriesServiceError {
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
