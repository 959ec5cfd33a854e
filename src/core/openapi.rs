use utoipa::{Modify, OpenApi};

use crate::features::fileserver::{dtos as fileserver_dtos, handlers as fileserver_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Fileserver
        fileserver_handlers::fileserver_page,
        fileserver_handlers::upload_file,
        fileserver_handlers::download_file,
        fileserver_handlers::delete_file,
        fileserver_handlers::list_files,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Fileserver
            fileserver_dtos::UploadFileDto,
            fileserver_dtos::FileEntryDto,
            ApiResponse<Vec<fileserver_dtos::FileEntryDto>>,
        )
    ),
    tags(
        (name = "fileserver", description = "File upload, listing, download and deletion"),
    ),
    info(
        title = "File Store API",
        version = "0.1.0",
        description = "API documentation for the file store service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
