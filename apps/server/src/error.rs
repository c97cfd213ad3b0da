//! Application error type and HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input failed declared rules or the tenant context is missing.
    /// Always raised before any business logic runs.
    #[error("{0}")]
    Validation(String),

    /// Bulk delete called with an empty identifier list.
    #[error("Nothing to delete.")]
    NothingToDelete,

    /// The delete statement reported zero rows affected.
    #[error("Failed to bulk delete {0}.")]
    BulkDeleteFailed(&'static str),

    /// The geocoding provider failed. The message is surfaced to the caller
    /// verbatim; there is no retry and no fallback to local-only results.
    #[error("{0}")]
    Geocoding(String),

    #[error("{resource_type} with id {id} not found")]
    ResourceNotFound { resource_type: String, id: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<fleetops_geocoding::Error> for Error {
    fn from(e: fleetops_geocoding::Error) -> Self {
        Error::Geocoding(e.to_string())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::NothingToDelete
            | Error::BulkDeleteFailed(_)
            | Error::Geocoding(_) => StatusCode::BAD_REQUEST,
            Error::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures are logged but never leak details to the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": { "message": message } }))).into_response()
    }
}
