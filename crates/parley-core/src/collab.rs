//! Collaborator ports: the bot-response function and the PDF processor.
//!
//! Both are opaque external collaborators; Parley only defines the seam.
//! Implementations live in parley-infra as HTTP clients. Uses RPITIT like
//! the repository traits.

use std::path::Path;

use parley_types::error::{IngestError, ResponderError};
use uuid::Uuid;

/// Produces the bot reply for a user message.
pub trait BotResponder: Send + Sync {
    /// Generate a reply to `message`. `has_pdf` tells the collaborator
    /// whether the client attached a PDF to this exchange.
    fn respond(
        &self,
        message: &str,
        has_pdf: bool,
    ) -> impl std::future::Future<Output = Result<String, ResponderError>> + Send;
}

/// Ingests uploaded PDFs into the collaborator's memory and evicts them.
pub trait PdfIngestor: Send + Sync {
    /// Hand a freshly stored PDF to the collaborator for processing.
    fn ingest(
        &self,
        pdf_id: &Uuid,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<(), IngestError>> + Send;

    /// Remove a previously ingested PDF from the collaborator's memory.
    fn evict(
        &self,
        pdf_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), IngestError>> + Send;
}
