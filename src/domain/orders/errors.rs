//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

use super::models::OrderStatus;

#[derive(Debug, ThisError)]
pub enum OrdersServiceError {
    /// Malformed input; carries every failing field message.
    #[error("order validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    /// The requested status change is not legal from the current status.
    #[error("invalid status transition from {current} to {attempted}")]
    InvalidState {
        current: OrderStatus,
        attempted: OrderStatus,
    },

    /// Tracking numbers only exist once the order has shipped.
    #[error("tracking number cannot be set while order is {current}")]
    TrackingUnavailable { current: OrderStatus },

    /// The actor lacks the admin or owner standing the operation requires.
    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
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
