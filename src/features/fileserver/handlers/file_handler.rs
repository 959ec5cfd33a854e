use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::fileserver::dtos::{FileEntryDto, UploadFileDto};
use crate::features::fileserver::services::FileService;
use crate::shared::templates::render_template;
use crate::shared::types::{ApiResponse, Meta};

/// Query parameters for the file list view
#[derive(Debug, Deserialize)]
pub struct ListViewQuery {
    /// Transient confirmation notice shown after a redirect
    pub notice: Option<String>,
}

/// Redirect target for the PRG flow, carrying a confirmation notice
fn list_view_url(notice: &str) -> String {
    format!("/fileserver?notice={}", urlencoding::encode(notice))
}

/// Render the file list view
#[utoipa::path(
    get,
    path = "/fileserver",
    tag = "fileserver",
    params(
        ("notice" = Option<String>, Query, description = "Transient confirmation notice")
    ),
    responses(
        (status = 200, description = "HTML file list view", content_type = "text/html"),
        (status = 500, description = "Store directory unreadable")
    )
)]
pub async fn fileserver_page(
    State(service): State<Arc<FileService>>,
    Query(query): Query<ListViewQuery>,
) -> Result<Html<String>, AppError> {
    let files = service.list().await?;

    let html = render_template(
        "fileserver.html",
        context! {
            files => files,
            notice => query.notice,
        },
    )?;

    Ok(Html(html))
}

/// Upload a file
///
/// Accepts multipart/form-data with a single `file` field. The stored name
/// is the client-supplied file name; uploading an existing name overwrites
/// it (last writer wins).
#[utoipa::path(
    post,
    path = "/fileserver",
    tag = "fileserver",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form",
    ),
    responses(
        (status = 303, description = "Redirect back to the file list"),
        (status = 400, description = "Missing file, unsafe file name or file too large"),
        (status = 413, description = "Multipart body exceeds the size limit")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let fname = field.file_name().map(|s| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = fname;
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate required fields
    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name = file_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;

    // Size limit is enforced by the service
    service.upload(&file_name, file_data).await?;

    Ok(Redirect::to(&list_view_url("File uploaded successfully")))
}

/// Download a file as an attachment
#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "fileserver",
    params(
        ("filename" = String, Path, description = "Name of the stored file")
    ),
    responses(
        (status = 200, description = "File content as attachment", content_type = "application/octet-stream"),
        (status = 400, description = "Unsafe file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = service.download(&filename).await?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        data,
    ))
}

/// Delete a file
#[utoipa::path(
    get,
    path = "/delete/{filename}",
    tag = "fileserver",
    params(
        ("filename" = String, Path, description = "Name of the stored file")
    ),
    responses(
        (status = 303, description = "Redirect back to the file list"),
        (status = 400, description = "Unsafe file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Redirect, AppError> {
    service.delete(&filename).await?;

    Ok(Redirect::to(&list_view_url("File deleted successfully")))
}

/// List stored files as JSON
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "fileserver",
    responses(
        (status = 200, description = "List of stored files", body = ApiResponse<Vec<FileEntryDto>>),
        (status = 500, description = "Store directory unreadable")
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<Vec<FileEntryDto>>>, AppError> {
    let files = service.list().await?;
    let total = files.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(files),
        None,
        Some(Meta { total }),
    )))
}
