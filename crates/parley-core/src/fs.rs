//! FileStore trait for abstracting upload-directory I/O.
//!
//! Defined in parley-core so the upload service can persist files without
//! depending on any specific filesystem implementation. The `LocalFileStore`
//! adapter lives in parley-infra.

use std::path::Path;

/// Abstraction over the byte-level file operations the upload service needs.
pub trait FileStore: Send + Sync {
    /// Write raw bytes to a file, creating parent directories as needed.
    fn write_bytes(
        &self,
        path: &Path,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;

    /// Remove a file. Must succeed silently when the file does not exist.
    fn remove_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}
