use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::fileserver::dtos::MAX_FILE_SIZE;
use crate::features::fileserver::handlers::{
    delete_file, download_file, fileserver_page, list_files, upload_file,
};
use crate::features::fileserver::services::FileService;

/// Create routes for the fileserver feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/fileserver",
            get(fileserver_page)
                .post(upload_file)
                // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/download/{filename}", get(download_file))
        .route("/delete/{filename}", get(delete_file))
        .route("/api/files", get(list_files))
        .with_state(file_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fileserver::dtos::FileEntryDto;
    use crate::modules::storage::LocalFileStore;
    use crate::shared::types::ApiResponse;
    use axum::http::{header, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use tempfile::TempDir;

    async fn test_server() -> (TestServer, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::open(dir.path()).await.unwrap();
        let service = Arc::new(FileService::new(Arc::new(store)));
        let server = TestServer::new(routes(service)).unwrap();
        (server, dir)
    }

    fn upload_form(name: &str, data: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(data)
                .file_name(name)
                .mime_type("application/octet-stream"),
        )
    }

    #[tokio::test]
    async fn test_upload_redirects_then_download_returns_same_bytes() {
        let (server, _dir) = test_server().await;
        let data = b"roundtrip payload".to_vec();

        let response = server
            .post("/fileserver")
            .multipart(upload_form("a.txt", data.clone()))
            .await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

        let response = server.get("/download/a.txt").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.as_bytes().as_ref(), data.as_slice());

        let disposition = response.header(header::CONTENT_DISPOSITION);
        assert_eq!(
            disposition.to_str().unwrap(),
            "attachment; filename=\"a.txt\""
        );
    }

    #[tokio::test]
    async fn test_list_page_shows_uploaded_file_and_notice() {
        let (server, _dir) = test_server().await;

        server
            .post("/fileserver")
            .multipart(upload_form("test.bin", vec![0u8; 2048]))
            .await;

        let response = server.get("/fileserver").add_query_param("notice", "done").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let html = response.text();
        assert!(html.contains("test.bin"));
        assert!(html.contains("2.00 KB"));
        assert!(html.contains("done"));
    }

    #[tokio::test]
    async fn test_download_missing_file_returns_404() {
        let (server, _dir) = test_server().await;

        let response = server.get("/download/missing.txt").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_file_returns_404() {
        let (server, _dir) = test_server().await;

        let response = server.get("/delete/missing.txt").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_download_returns_404() {
        let (server, _dir) = test_server().await;

        server
            .post("/fileserver")
            .multipart(upload_form("a.txt", b"data".to_vec()))
            .await;

        let response = server.get("/delete/a.txt").await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

        let response = server.get("/download/a.txt").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_returns_400() {
        let (server, _dir) = test_server().await;

        let response = server
            .post("/fileserver")
            .multipart(MultipartForm::new().add_text("other", "value"))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_traversal_name_is_rejected() {
        let (server, _dir) = test_server().await;

        let response = server.get("/download/..%2Fescape.txt").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_files_lists_entries_with_metadata() {
        let (server, _dir) = test_server().await;

        server
            .post("/fileserver")
            .multipart(upload_form("test.bin", vec![0u8; 2048]))
            .await;

        let response = server.get("/api/files").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: ApiResponse<Vec<FileEntryDto>> = response.json();
        assert!(body.success);
        assert_eq!(body.meta.unwrap().total, 1);

        let files = body.data.unwrap();
        assert_eq!(files[0].name, "test.bin");
        assert_eq!(files[0].size_bytes, 2048);
        assert_eq!(files[0].size, "2.00 KB");
    }
}
