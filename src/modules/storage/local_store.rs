//! Local filesystem storage backend
//!
//! The upload directory is the single source of truth: every stored file is
//! a regular file directly inside it, and every listing re-scans it. No
//! index or database sits in front of the filesystem.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StoreConfig;
use crate::core::error::{AppError, Result};
use crate::shared::validation::is_valid_file_name;

/// Metadata for a single stored file, derived from its directory entry
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
}

/// Storage interface for the file store.
///
/// Kept behind a trait so tests (or another deployment) can substitute a
/// different backend for the configured upload directory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write or overwrite the file of the given name
    async fn put(&self, name: &str, data: Vec<u8>) -> Result<()>;

    /// Scan the store directory and return metadata for every stored file
    async fn list(&self) -> Result<Vec<StoredFile>>;

    /// Read the full content of the named file
    async fn get(&self, name: &str) -> Result<Vec<u8>>;

    /// Permanently remove the named file
    async fn delete(&self, name: &str) -> Result<()>;
}

/// File store over one flat local directory
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store from configuration, creating the upload directory if missing
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        let store = Self::open(config.upload_dir.clone()).await?;
        info!("File store initialized at {}", store.root.display());
        Ok(store)
    }

    /// Open a store rooted at the given directory, creating it if missing
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn map_io_error(e: std::io::Error, name: &str) -> AppError {
        if e.kind() == ErrorKind::NotFound {
            AppError::NotFound(format!("File '{}' not found", name))
        } else {
            AppError::Io(e)
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, name: &str, data: Vec<u8>) -> Result<()> {
        // Write into a temporary sibling first, then rename into place.
        // Rename is atomic within one directory, so a concurrent reader sees
        // either the previous content or the new content, never a torn file.
        let tmp = self.root.join(format!(".{}.part", Uuid::new_v4()));

        fs::write(&tmp, &data).await?;

        if let Err(e) = fs::rename(&tmp, self.entry_path(name)).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::Io(e));
        }

        debug!("Stored file '{}' ({} bytes)", name, data.len());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredFile>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };

            // Skips in-flight ".{uuid}.part" temporaries and any stray entry
            // that could not have been created through the upload path
            if !is_valid_file_name(&name) {
                continue;
            }

            // The entry can be deleted between read_dir and this call;
            // a vanished file simply drops out of the listing
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }

            // Creation time is not available on every filesystem
            let modified_at = metadata.modified()?;
            let created_at = metadata.created().unwrap_or(modified_at);

            files.push(StoredFile {
                name,
                size_bytes: metadata.len(),
                created_at: DateTime::<Local>::from(created_at),
                modified_at: DateTime::<Local>::from(modified_at),
            });
        }

        // Directory enumeration order is platform-dependent; sort for a stable view
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(files)
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.entry_path(name))
            .await
            .map_err(|e| Self::map_io_error(e, name))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.entry_path(name))
            .await
            .map_err(|e| Self::map_io_error(e, name))?;

        debug!("Deleted file '{}'", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store_in(dir: &tempfile::TempDir) -> LocalFileStore {
        LocalFileStore::open(dir.path()).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_returns_same_bytes() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let data = b"hello file store".to_vec();
        store.put("a.txt", data.clone()).await.unwrap();

        assert_eq!(store.get("a.txt").await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store.put("a.txt", b"first".to_vec()).await.unwrap();
        store.put("a.txt", b"second".to_vec()).await.unwrap();

        assert_eq!(store.get("a.txt").await.unwrap(), b"second");

        let files = store.list().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 6);
    }

    #[tokio::test]
    async fn test_list_reports_name_and_size() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let data = vec![0u8; 2048];
        store.put("test.bin", data).await.unwrap();

        let files = store.list().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "test.bin");
        assert_eq!(files[0].size_bytes, 2048);
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_skips_hidden_entries() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store.put("b.txt", b"b".to_vec()).await.unwrap();
        store.put("a.txt", b"a".to_vec()).await.unwrap();

        // Stray entries that never came through the upload path
        std::fs::write(dir.path().join(".stray.part"), b"tmp").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_skips_entries_that_vanish_before_stat() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store.put("a.txt", b"a".to_vec()).await.unwrap();

        // A dangling symlink stats like a file deleted between read_dir
        // and the metadata call
        std::os::unix::fs::symlink(
            dir.path().join("gone.txt"),
            dir.path().join("ghost.txt"),
        )
        .unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.txt"]);
    }

    #[tokio::test]
    async fn test_get_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        let err = store.get("missing.txt").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found_and_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store.put("keep.txt", b"data".to_vec()).await.unwrap();

        let err = store.delete("missing.txt").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let files = store.list().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "keep.txt");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir).await;

        store.put("a.txt", b"data".to_vec()).await.unwrap();
        store.delete("a.txt").await.unwrap();

        let err = store.get("a.txt").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
