use std::sync::Arc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::fileserver::dtos::{FileEntryDto, MAX_FILE_SIZE};
use crate::modules::storage::FileStore;
use crate::shared::validation::is_valid_file_name;

/// Service for file store operations
pub struct FileService {
    store: Arc<dyn FileStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Reject unsafe names before any filesystem call.
    ///
    /// Applied to every operation that takes a client-supplied name, so a
    /// traversal sequence can never reach the store.
    fn validate_name(name: &str) -> Result<()> {
        if is_valid_file_name(name) {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Invalid file name '{}'",
                name
            )))
        }
    }

    /// Store a file under the given name, overwriting any previous content
    /// (last writer wins)
    pub async fn upload(&self, name: &str, data: Vec<u8>) -> Result<()> {
        Self::validate_name(name)?;

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let size = data.len();
        self.store.put(name, data).await?;

        info!("File uploaded: name={}, size={}", name, size);
        Ok(())
    }

    /// List all stored files with human-readable metadata
    pub async fn list(&self) -> Result<Vec<FileEntryDto>> {
        let files = self.store.list().await?;
        Ok(files.into_iter().map(Into::into).collect())
    }

    /// Return the full content of the named file
    pub async fn download(&self, name: &str) -> Result<Vec<u8>> {
        Self::validate_name(name)?;
        self.store.get(name).await
    }

    /// Permanently remove the named file
    pub async fn delete(&self, name: &str) -> Result<()> {
        Self::validate_name(name)?;
        self.store.delete(name).await?;

        info!("File deleted: name={}", name);
        Ok(())
    }
}
