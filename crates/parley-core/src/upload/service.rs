//! Upload service: validate, store, and hand PDFs to the ingest collaborator.
//!
//! Files land in the managed upload directory as `{uuid}.pdf`; the original
//! filename is only inspected for its extension, never used on disk. If the
//! collaborator rejects a file, the just-written copy is removed so the
//! directory never retains orphans on that path.

use std::path::{Path, PathBuf};

use parley_types::error::UploadError;
use parley_types::upload::StoredPdf;
use tracing::{info, warn};
use uuid::Uuid;

use crate::collab::PdfIngestor;
use crate::fs::FileStore;

/// Extensions accepted for upload.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Stores uploaded PDFs and delegates content processing.
///
/// Generic over `PdfIngestor` and `FileStore` so tests can substitute both
/// collaborator and filesystem.
pub struct UploadService<P: PdfIngestor, F: FileStore> {
    ingestor: P,
    file_store: F,
    upload_dir: PathBuf,
}

impl<P: PdfIngestor, F: FileStore> UploadService<P, F> {
    /// Create a new upload service rooted at `upload_dir`.
    pub fn new(ingestor: P, file_store: F, upload_dir: PathBuf) -> Self {
        Self {
            ingestor,
            file_store,
            upload_dir,
        }
    }

    /// The managed upload directory.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// On-disk path for a given PDF id.
    fn pdf_path(&self, pdf_id: &Uuid) -> PathBuf {
        self.upload_dir.join(format!("{pdf_id}.pdf"))
    }

    /// Validate, persist, and ingest an uploaded file.
    ///
    /// Rejects empty filenames and non-PDF extensions before touching disk.
    /// A collaborator failure deletes the stored file and surfaces the
    /// collaborator's message verbatim.
    pub async fn store(&self, filename: &str, bytes: &[u8]) -> Result<StoredPdf, UploadError> {
        if filename.is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        if !has_allowed_extension(filename) {
            return Err(UploadError::InvalidFileType);
        }

        let pdf_id = Uuid::now_v7();
        let stored_name = format!("{pdf_id}.pdf");
        let path = self.pdf_path(&pdf_id);

        self.file_store.write_bytes(&path, bytes).await?;

        if let Err(e) = self.ingestor.ingest(&pdf_id, &path).await {
            warn!(pdf_id = %pdf_id, error = %e, "PDF ingest failed, removing stored file");
            if let Err(rm) = self.file_store.remove_file(&path).await {
                warn!(path = %path.display(), error = %rm, "failed to remove rejected upload");
            }
            return Err(UploadError::Ingest(e.0));
        }

        info!(pdf_id = %pdf_id, size = bytes.len(), "PDF stored and ingested");
        Ok(StoredPdf {
            pdf_id,
            url: format!("/uploads/{stored_name}"),
            stored_name,
        })
    }

    /// Evict a PDF from the collaborator and delete its file if present.
    ///
    /// `pdf_id` arrives as client input; anything that is not a UUID is
    /// refused before it can reach the filesystem.
    pub async fn remove(&self, pdf_id: &str) -> Result<(), UploadError> {
        if pdf_id.is_empty() {
            return Err(UploadError::MissingPdfId);
        }
        let pdf_id: Uuid = pdf_id.parse().map_err(|_| UploadError::InvalidPdfId)?;

        self.ingestor
            .evict(&pdf_id)
            .await
            .map_err(|e| UploadError::Evict(e.0))?;

        let path = self.pdf_path(&pdf_id);
        if self.file_store.exists(&path).await {
            self.file_store.remove_file(&path).await?;
        }
        info!(pdf_id = %pdf_id, "PDF removed");
        Ok(())
    }
}

/// Case-insensitive extension membership test.
fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::error::IngestError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory FileStore tracking written files.
    #[derive(Default)]
    struct MemStore {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MemStore {
        fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }
    }

    impl FileStore for MemStore {
        async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }

        async fn remove_file(&self, path: &Path) -> Result<(), std::io::Error> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    /// Ingestor that accepts everything.
    struct OkIngestor;

    impl PdfIngestor for OkIngestor {
        async fn ingest(&self, _pdf_id: &Uuid, _path: &Path) -> Result<(), IngestError> {
            Ok(())
        }

        async fn evict(&self, _pdf_id: &Uuid) -> Result<(), IngestError> {
            Ok(())
        }
    }

    /// Ingestor that rejects every ingest.
    struct RejectingIngestor;

    impl PdfIngestor for RejectingIngestor {
        async fn ingest(&self, _pdf_id: &Uuid, _path: &Path) -> Result<(), IngestError> {
            Err(IngestError("bad pdf".to_string()))
        }

        async fn evict(&self, _pdf_id: &Uuid) -> Result<(), IngestError> {
            Ok(())
        }
    }

    fn dir() -> PathBuf {
        PathBuf::from("/uploads-test")
    }

    #[tokio::test]
    async fn store_accepts_pdf_and_returns_url() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let receipt = svc.store("notes.pdf", b"%PDF-1.4").await.unwrap();

        assert_eq!(receipt.stored_name, format!("{}.pdf", receipt.pdf_id));
        assert_eq!(receipt.url, format!("/uploads/{}.pdf", receipt.pdf_id));
        assert!(svc.file_store.exists(&svc.pdf_path(&receipt.pdf_id)).await);
    }

    #[tokio::test]
    async fn store_rejects_wrong_extension_without_writing() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let err = svc.store("evil.exe", b"MZ").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid file type");
        assert_eq!(svc.file_store.file_count(), 0);
    }

    #[tokio::test]
    async fn store_rejects_empty_filename() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let err = svc.store("", b"data").await.unwrap_err();
        assert_eq!(err.to_string(), "No selected file");
    }

    #[tokio::test]
    async fn store_accepts_uppercase_extension() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        assert!(svc.store("REPORT.PDF", b"%PDF").await.is_ok());
    }

    #[tokio::test]
    async fn ingest_failure_removes_stored_file() {
        let svc = UploadService::new(RejectingIngestor, MemStore::default(), dir());
        let err = svc.store("notes.pdf", b"%PDF").await.unwrap_err();

        assert_eq!(err.to_string(), "bad pdf");
        assert_eq!(svc.file_store.file_count(), 0, "rejected upload must not orphan files");
    }

    #[tokio::test]
    async fn remove_requires_pdf_id() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let err = svc.remove("").await.unwrap_err();
        assert_eq!(err.to_string(), "No PDF ID provided");
    }

    #[tokio::test]
    async fn remove_refuses_non_uuid_id() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let err = svc.remove("../../etc/passwd").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid PDF ID");
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        let receipt = svc.store("notes.pdf", b"%PDF").await.unwrap();

        svc.remove(&receipt.pdf_id.to_string()).await.unwrap();
        assert_eq!(svc.file_store.file_count(), 0);
    }

    #[tokio::test]
    async fn remove_without_file_still_succeeds() {
        // Evict can succeed even when the file was already gone from disk.
        let svc = UploadService::new(OkIngestor, MemStore::default(), dir());
        svc.remove(&Uuid::now_v7().to_string()).await.unwrap();
    }

    #[test]
    fn extension_check_requires_a_dot() {
        assert!(!has_allowed_extension("pdf"));
        assert!(has_allowed_extension("a.pdf"));
        assert!(!has_allowed_extension("archive.pdf.exe"));
    }
}
