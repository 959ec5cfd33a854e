use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::storage::StoredFile;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// One stored file as shown in listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileEntryDto {
    /// File name, unique within the store directory
    pub name: String,
    /// Exact size in bytes
    pub size_bytes: u64,
    /// Human-readable size, e.g. "2.00 KB"
    pub size: String,
    /// Creation timestamp, local time, "YYYY-MM-DD HH:MM:SS"
    pub created_at: String,
    /// Last modification timestamp, local time, "YYYY-MM-DD HH:MM:SS"
    pub modified_at: String,
}

/// Textual format for listing timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum upload size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Render a byte count as a 2-decimal value with the first unit that
/// brings it below 1024, falling through to PB
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

impl From<StoredFile> for FileEntryDto {
    fn from(file: StoredFile) -> Self {
        Self {
            size: format_size(file.size_bytes),
            size_bytes: file.size_bytes,
            created_at: file.created_at.format(TIMESTAMP_FORMAT).to_string(),
            modified_at: file.modified_at.format(TIMESTAMP_FORMAT).to_string(),
            name: file.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_format_size_bytes_below_1024() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn test_format_size_rolls_over_at_exactly_1024() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_format_size_large_units() {
        assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_size(1024u64.pow(4)), "1.00 TB");
        assert_eq!(format_size(1024u64.pow(5)), "1.00 PB");
        // Past PB there is no further unit; the value keeps growing
        assert_eq!(format_size(1024u64.pow(6)), "1024.00 PB");
    }

    #[test]
    fn test_entry_dto_from_stored_file() {
        let now = Local::now();
        let dto = FileEntryDto::from(StoredFile {
            name: "test.bin".to_string(),
            size_bytes: 2048,
            created_at: now,
            modified_at: now,
        });

        assert_eq!(dto.name, "test.bin");
        assert_eq!(dto.size_bytes, 2048);
        assert_eq!(dto.size, "2.00 KB");
        assert_eq!(dto.created_at, now.format(TIMESTAMP_FORMAT).to_string());
    }
}
