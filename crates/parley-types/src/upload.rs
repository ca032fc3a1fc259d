//! Upload receipt type returned by the upload service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Receipt for a stored PDF.
///
/// `url` is the public path the file is served from (`/uploads/{id}.pdf`);
/// no persisted relation to any chat session exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPdf {
    pub pdf_id: Uuid,
    pub stored_name: String,
    pub url: String,
}
