//! Error handling module.
//!
//! This module provides unified error handling with HTTP status code mapping
//! and the JSON error bodies returned by the students API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::domain::{OPTIONAL_FIELDS, REQUIRED_FIELDS, WriteOperation};

/// Sample request bodies returned alongside "No data received".
const JSON_EXAMPLE: &str = r#"{"firstname":"John","lastname":"Doe","gender":"male","age":"25"}"#;
const FORM_EXAMPLE: &str = "firstname=John&lastname=Doe&gender=male&age=25";

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body carried no fields.
    #[error("No data received")]
    NoData,

    /// The request body could not be decoded.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Required student fields are missing or empty.
    #[error("{}", .operation.missing_fields_message())]
    MissingFields {
        /// Endpoint the payload was sent to.
        operation: WriteOperation,
        /// Body exactly as received.
        received: Value,
    },

    /// Lookup of a single student found nothing.
    #[error("Student not found")]
    StudentNotFound,

    /// Update or delete matched no row.
    #[error("No student found with that ID")]
    NoSuchStudent {
        /// Id as given in the request path.
        id: String,
    },

    /// Storage backend error.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Storage backend error during an operation with a known description.
    #[error("{source}")]
    StorageFailed {
        /// Underlying storage error.
        source: StorageError,
        /// What the failed operation was doing.
        details: &'static str,
    },
}

impl AppError {
    /// Wrap a storage error with a description of the failed operation.
    #[must_use]
    pub const fn storage(source: StorageError, details: &'static str) -> Self {
        Self::StorageFailed { source, details }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoData | Self::MalformedBody(_) | Self::MissingFields { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::StudentNotFound | Self::NoSuchStudent { .. } => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::StorageFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the JSON body for this error.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::NoData => json!({
                "error": self.to_string(),
                "solution": "Ensure you are sending with Content-Type: application/json or application/x-www-form-urlencoded",
                "example": {
                    "json": JSON_EXAMPLE,
                    "form": FORM_EXAMPLE
                }
            }),
            Self::MalformedBody(details) => json!({
                "error": "Malformed request body",
                "details": details
            }),
            Self::MissingFields { received, .. } => json!({
                "error": self.to_string(),
                "required": REQUIRED_FIELDS,
                "optional": OPTIONAL_FIELDS,
                "received": received
            }),
            Self::StudentNotFound => json!({ "message": self.to_string() }),
            Self::NoSuchStudent { id } => json!({
                "message": self.to_string(),
                "id": id
            }),
            Self::Storage(_) => json!({ "error": self.to_string() }),
            Self::StorageFailed { details, .. } => json!({
                "error": self.to_string(),
                "details": details
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query failed: {0}")]
    Query(String),

    /// Constraint violation reported by the database.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Schema bootstrap error.
    #[error("Schema setup failed: {0}")]
    Schema(String),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolClosed => Self::Connection(err.to_string()),
            sqlx::Error::PoolTimedOut => Self::Unavailable,
            sqlx::Error::Database(ref db)
                if !matches!(db.kind(), sqlx::error::ErrorKind::Other) =>
            {
                Self::Constraint(db.message().to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
