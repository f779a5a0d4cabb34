//! Registry service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl.
//! Messages returned to clients are generic; the actual cause is logged
//! server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Registry service error type.
///
/// Maps to HTTP status codes:
/// - Database, InjectedFault: 500 Internal Server Error
/// - BadRequest: 400 Bad Request
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Synthetic write failure produced while fault mode is enabled.
    #[error("Injected fault")]
    InjectedFault,
}

impl RegistryError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::Database(_) | RegistryError::InjectedFault => 500,
            RegistryError::BadRequest(_) => 400,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

const DATABASE_ERROR_MESSAGE: &str = "An internal database error occurred";

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            RegistryError::Database(err) => {
                tracing::error!(target: "registry.database", error = %err, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    DATABASE_ERROR_MESSAGE.to_string(),
                )
            }
            // Clients must not be able to tell an injected fault from a real one.
            RegistryError::InjectedFault => {
                tracing::warn!(target: "registry.fault_injection", "Returning injected fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    DATABASE_ERROR_MESSAGE.to_string(),
                )
            }
            RegistryError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Convert sqlx errors to RegistryError
impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        RegistryError::Database(err.to_string())
    }
}
