//! BBS Error Types
//!
//! This module provides BBS-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::schema::ValidationError;
use thiserror::Error;

/// BBS-specific result type alias
pub type BbsResult<T> = Result<T, BbsError>;

/// BBS-specific error variants
#[derive(Debug, Error)]
pub enum BbsError {
    /// Article does not exist in the requested section
    #[error("Article not found")]
    ArticleNotFound,

    /// Transport-supplied input does not match its declared shape
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request could not be read at all (not JSON, bad query or path encoding)
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BbsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BbsError::ArticleNotFound => ErrorKind::NotFound,
            BbsError::Validation(_) | BbsError::MalformedRequest(_) => ErrorKind::BadRequest,
            BbsError::Database(e) => AppError::from_sqlx(e).kind(),
            BbsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            BbsError::Validation(err) => AppError::from(err.clone()),
            BbsError::Database(e) => AppError::from_sqlx(e),
            BbsError::Internal(_) => AppError::new(self.kind(), "Internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BbsError::Database(e) => {
                tracing::error!(error = %e, "BBS database error");
            }
            BbsError::Internal(msg) => {
                tracing::error!(message = %msg, "BBS internal error");
            }
            BbsError::Validation(e) => {
                tracing::debug!(path = e.path(), expected = e.expected(), "Rejected input");
            }
            _ => {
                tracing::debug!(error = %self, "BBS error");
            }
        }
    }
}

impl From<BbsError> for AppError {
    fn from(err: BbsError) -> Self {
        match err {
            BbsError::Database(e) => AppError::from(e),
            other => other.to_app_error(),
        }
    }
}

impl IntoResponse for BbsError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
