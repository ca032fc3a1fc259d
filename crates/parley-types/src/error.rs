use thiserror::Error;

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the bot-response collaborator.
///
/// The collaborator is opaque; its failure reason is carried as a string and
/// surfaced verbatim to the client.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ResponderError(pub String);

/// Error raised by the PDF collaborator; the message is surfaced verbatim.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct IngestError(pub String);

/// Errors related to chat operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Responder(String),
}

impl From<ResponderError> for ChatError {
    fn from(e: ResponderError) -> Self {
        ChatError::Responder(e.0)
    }
}

/// Errors related to PDF upload handling.
///
/// The `Display` strings for the validation variants are part of the wire
/// contract: clients match on them.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("No PDF ID provided")]
    MissingPdfId,

    #[error("Invalid PDF ID")]
    InvalidPdfId,

    /// Ingest collaborator failure; message passed through verbatim.
    #[error("{0}")]
    Ingest(String),

    /// Eviction collaborator failure; message passed through verbatim.
    #[error("{0}")]
    Evict(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Whether this error came from client input rather than a collaborator
    /// or the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::MissingFile
                | UploadError::EmptyFilename
                | UploadError::InvalidFileType
                | UploadError::MissingPdfId
                | UploadError::InvalidPdfId
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_error_wire_messages() {
        assert_eq!(UploadError::MissingFile.to_string(), "No file part");
        assert_eq!(UploadError::EmptyFilename.to_string(), "No selected file");
        assert_eq!(UploadError::InvalidFileType.to_string(), "Invalid file type");
        assert_eq!(UploadError::MissingPdfId.to_string(), "No PDF ID provided");
    }

    #[test]
    fn ingest_error_passes_message_through() {
        let err = UploadError::Ingest("bad pdf".to_string());
        assert_eq!(err.to_string(), "bad pdf");
        assert!(!err.is_validation());
    }

    #[test]
    fn chat_error_wraps_responder() {
        let err: ChatError = ResponderError("upstream down".to_string()).into();
        assert_eq!(err.to_string(), "upstream down");
    }
}
