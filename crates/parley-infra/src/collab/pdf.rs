//! HTTP client for the PDF ingest/evict collaborator.
//!
//! POST `{base_url}/ingest` with `{"pdf_id": ..., "path": ...}` and
//! POST `{base_url}/evict` with `{"pdf_id": ...}`. Error bodies are passed
//! through verbatim so the upload routes can surface them unchanged.

use std::path::Path;
use std::time::Duration;

use parley_core::collab::PdfIngestor;
use parley_types::error::IngestError;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Reqwest-backed implementation of [`PdfIngestor`].
pub struct HttpPdfIngestor {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct IngestRequest<'a> {
    pdf_id: &'a Uuid,
    path: &'a str,
}

#[derive(Serialize)]
struct EvictRequest<'a> {
    pdf_id: &'a Uuid,
}

impl HttpPdfIngestor {
    /// Create a new ingest client against `base_url`.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self { client, base_url }
    }

    fn url(&self, op: &str) -> String {
        format!("{}/{op}", self.base_url.trim_end_matches('/'))
    }

    async fn post<T: Serialize>(&self, op: &str, body: &T) -> Result<(), IngestError> {
        let response = self
            .client
            .post(self.url(op))
            .json(body)
            .send()
            .await
            .map_err(|e| IngestError(format!("pdf {op} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(IngestError(if error_body.is_empty() {
                format!("pdf collaborator returned HTTP {status}")
            } else {
                error_body
            }));
        }
        Ok(())
    }
}

impl PdfIngestor for HttpPdfIngestor {
    async fn ingest(&self, pdf_id: &Uuid, path: &Path) -> Result<(), IngestError> {
        debug!(pdf_id = %pdf_id, "handing PDF to ingest collaborator");
        self.post(
            "ingest",
            &IngestRequest {
                pdf_id,
                path: &path.display().to_string(),
            },
        )
        .await
    }

    async fn evict(&self, pdf_id: &Uuid) -> Result<(), IngestError> {
        debug!(pdf_id = %pdf_id, "evicting PDF from collaborator memory");
        self.post("evict", &EvictRequest { pdf_id }).await
    }
}
