//! PDF upload handlers.
//!
//! Endpoints:
//! - POST /upload_pdf - multipart upload, field name `pdf`
//! - POST /remove_pdf - evict a PDF and delete its file
//!
//! Static serving of stored files under `/uploads/` is wired in the router
//! via `ServeDir`.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use parley_types::error::UploadError;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RemovePdfRequest {
    #[serde(default)]
    pub pdf_id: Option<String>,
}

/// POST /upload_pdf - Validate, store, and ingest an uploaded PDF.
///
/// Expects a multipart form with the file under the `pdf` field. Responds
/// `{"success": true, "pdf_id": ..., "pdf_url": ...}` on acceptance; all
/// rejections share the `{"success": false, "error": ...}` envelope.
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("pdf") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(UploadError::MissingFile.into());
    };

    let stored = state.upload_service.store(&filename, &bytes).await?;

    Ok(Json(json!({
        "success": true,
        "pdf_id": stored.pdf_id,
        "pdf_url": stored.url,
    }))
    .into_response())
}

/// POST /remove_pdf - Evict a PDF from collaborator memory and disk.
pub async fn remove_pdf(
    State(state): State<AppState>,
    Json(body): Json<RemovePdfRequest>,
) -> Result<Response, AppError> {
    let pdf_id = body.pdf_id.unwrap_or_default();
    state.upload_service.remove(&pdf_id).await?;
    Ok(Json(json!({"success": true})).into_response())
}
