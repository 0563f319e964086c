use crate::{
    error::{AppError, AppResult},
    middleware::AdminUser,
    response::ApiResponse,
    services::upload::{StoredFile, UploadConfig, UploadKind, UploadService},
};
use axum::{
    extract::{Multipart, Path},
    response::IntoResponse,
    Extension,
};

/// Store an image for use in articles or SEO records.
/// POST /admin/uploads/{kind} (multipart form: field "file")
#[utoipa::path(
    post,
    path = "/admin/uploads/{kind}",
    security(("admin_token" = [])),
    params(("kind" = UploadKind, Path, description = "thumbnail, content_image or og_image")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Image in a field named `file`"),
    responses(
        (status = 200, description = "Stored file", body = StoredFile),
        (status = 400, description = "Not an accepted image", body = AppError),
        (status = 413, description = "Larger than 5 MB", body = AppError),
    ),
    tag = "admin"
)]
pub async fn upload_image(
    Extension(config): Extension<UploadConfig>,
    _admin: AdminUser,
    Path(kind): Path<UploadKind>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file data: {}", e)))?;

        let stored = UploadService::save_image(&config, kind, &data, &content_type).await?;
        return Ok(ApiResponse::ok(stored));
    }

    Err(AppError::Validation("No file provided".to_string()))
}
