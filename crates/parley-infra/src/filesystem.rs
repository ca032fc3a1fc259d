//! Filesystem adapters for Parley.
//!
//! Implements the `FileStore` trait from `parley-core` for real filesystem
//! I/O and resolves the data/upload directories.

use std::path::{Path, PathBuf};

use parley_core::fs::FileStore;

/// Local filesystem implementation of the `FileStore` trait.
///
/// All operations go through `tokio::fs` for async I/O.
pub struct LocalFileStore;

impl LocalFileStore {
    /// Create a new LocalFileStore adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for LocalFileStore {
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await
    }

    async fn remove_file(&self, path: &Path) -> Result<(), std::io::Error> {
        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PARLEY_DATA_DIR` environment variable
/// 2. Platform home directory: `~/.parley`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parley");
    }

    // Last resort: current directory
    PathBuf::from(".parley")
}

/// Compute the upload directory: the config override, else `{data_dir}/uploads`.
pub fn resolve_upload_dir(data_dir: &Path, configured: Option<&str>) -> PathBuf {
    match configured {
        Some(dir) => PathBuf::from(dir),
        None => data_dir.join("uploads"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new();
        let path = dir.path().join("nested").join("file.pdf");

        store.write_bytes(&path, b"%PDF").await.unwrap();
        assert!(store.exists(&path).await);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new();
        store
            .remove_file(&dir.path().join("never-written.pdf"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_file() {
        let dir = tempdir().unwrap();
        let store = LocalFileStore::new();
        let path = dir.path().join("gone.pdf");
        store.write_bytes(&path, b"x").await.unwrap();

        store.remove_file(&path).await.unwrap();
        assert!(!store.exists(&path).await);
    }

    #[test]
    fn upload_dir_defaults_under_data_dir() {
        let data = PathBuf::from("/data");
        assert_eq!(
            resolve_upload_dir(&data, None),
            PathBuf::from("/data/uploads")
        );
        assert_eq!(
            resolve_upload_dir(&data, Some("/srv/uploads")),
            PathBuf::from("/srv/uploads")
        );
    }
}
