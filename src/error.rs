//! Error types for stores, the completion evaluator and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::models::EnrollmentStatus;

/// Errors raised by the storage collaborators.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database driver error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be turned into a domain value.
    #[error("corrupt {table} row {id}: {reason}")]
    Corrupt {
        table: &'static str,
        id: i64,
        reason: String,
    },
}

/// Errors returned by grading and enrollment operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad caller input.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The addressed record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// The enrollment is in a state the operation may not touch.
    #[error("enrollment {enrollment_id} is {status:?}")]
    InvalidState {
        enrollment_id: i64,
        status: EnrollmentStatus,
    },

    /// Lost an optimistic-lock race; retry with fresh reads.
    #[error("enrollment {enrollment_id} was modified concurrently")]
    ConcurrencyConflict { enrollment_id: i64 },

    /// Storage failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether a caller may retry the same operation after re-reading.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that a record identifier is positive.
pub fn validate_id(field: &'static str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::Validation {
            field,
            reason: format!("must be positive, got {id}"),
        });
    }

    Ok(())
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("not allowed to access this resource")]
    Forbidden,

    #[error(transparent)]
    Gradebook(#[from] Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Gradebook(Error::Store(err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    retryable: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Gradebook(Error::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::Gradebook(Error::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Gradebook(Error::InvalidState { .. } | Error::ConcurrencyConflict { .. }) => {
                StatusCode::CONFLICT
            }
            Self::Gradebook(Error::Store(_)) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let retryable = matches!(&self, Self::Gradebook(err) if err.is_retryable());

        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error, retryable })).into_response()
    }
}
