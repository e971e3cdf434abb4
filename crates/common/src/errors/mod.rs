//! Error types for the Movies API
//!
//! Provides:
//! - Distinct error types for each failure mode
//! - HTTP status code mapping
//! - Structured error responses with machine-readable codes

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MovieReferenceNotFound,

    // Resource errors (4xxx)
    MovieNotFound,
    RatingNotFound,
    ResourceIdInvalid,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::MovieReferenceNotFound => 1002,

            ErrorCode::MovieNotFound => 4001,
            ErrorCode::RatingNotFound => 4002,
            ErrorCode::ResourceIdInvalid => 4003,

            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A rating pointed at a movie that does not exist. This is a bad
    /// request, not a 404: the rating is the resource being created.
    #[error("No movie exists with id '{movie_id}'.")]
    MovieReferenceNotFound { movie_id: Uuid },

    // Resource errors
    #[error("No movie matched the given id of '{id}'")]
    MovieNotFound { id: Uuid },

    #[error("No movie rating matched the given id of '{id}'.")]
    RatingNotFound { id: Uuid },

    /// A path segment that cannot be an id names no resource at all
    #[error("{message}")]
    ResourceIdInvalid { message: String },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MovieReferenceNotFound { .. } => ErrorCode::MovieReferenceNotFound,
            AppError::MovieNotFound { .. } => ErrorCode::MovieNotFound,
            AppError::RatingNotFound { .. } => ErrorCode::RatingNotFound,
            AppError::ResourceIdInvalid { .. } => ErrorCode::ResourceIdInvalid,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } |
            AppError::MovieReferenceNotFound { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::MovieNotFound { .. } |
            AppError::RatingNotFound { .. } |
            AppError::ResourceIdInvalid { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Database(_) |
            AppError::DatabaseConnection { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    /// Numeric form of `code`
    pub number: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let field = match self {
            AppError::Validation { field, .. } => field,
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                number: code.as_code(),
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Unreadable request bodies are bad requests, whatever axum's default status
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: rejection.body_text(),
            field: None,
        }
    }
}

/// An id segment that does not parse matches no resource
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ResourceIdInvalid {
            message: rejection.body_text(),
        }
    }
}
