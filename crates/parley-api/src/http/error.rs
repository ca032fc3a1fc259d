//! Application error type mapping to the wire envelope.
//!
//! All client-caused and collaborator failures answer HTTP 200 with
//! `{"success": false, "error": ...}` (lookup misses omit the message);
//! only repository/IO faults become a 500. The kinds stay tagged internally
//! so handlers and tests never match on message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use parley_types::error::{ChatError, UploadError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Client input failed validation; message is part of the wire contract.
    Validation(String),
    /// An external collaborator failed; its message passes through verbatim.
    Collaborator(String),
    /// A referenced entity does not exist (bare `success: false` on the wire).
    Lookup,
    /// Repository or IO fault.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Responder(msg) => AppError::Collaborator(msg),
            ChatError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Ingest(msg) | UploadError::Evict(msg) => AppError::Collaborator(msg),
            other if other.is_validation() => AppError::Validation(other.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) | AppError::Collaborator(msg) => (
                StatusCode::OK,
                Json(json!({"success": false, "error": msg})),
            )
                .into_response(),
            AppError::Lookup => {
                (StatusCode::OK, Json(json!({"success": false}))).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"success": false, "error": msg})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::error::RepositoryError;

    #[test]
    fn upload_validation_maps_to_validation() {
        let err: AppError = UploadError::InvalidFileType.into();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid file type"));
    }

    #[test]
    fn ingest_failure_maps_to_collaborator() {
        let err: AppError = UploadError::Ingest("bad pdf".to_string()).into();
        assert!(matches!(err, AppError::Collaborator(msg) if msg == "bad pdf"));
    }

    #[test]
    fn repository_failure_maps_to_internal() {
        let err: AppError = ChatError::Repository(RepositoryError::Connection).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn upload_io_failure_maps_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = UploadError::Io(io).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
