use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::images::dtos::{UploadImageDto, UploadedImageDto};
use crate::features::images::services::{ImageFolder, ImageService};
use crate::shared::types::ApiResponse;

/// Upload an image for a submission or organizer
///
/// Accepts multipart/form-data with:
/// - `file`: The image (required)
/// - `folder`: "submissions" or "heads" (optional, defaults to "submissions")
#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<UploadedImageDto>),
        (status = 400, description = "Invalid image type or size"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Storage failure, safe to retry")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    _user: AuthenticatedUser,
    State(service): State<Arc<ImageService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImageDto>>)> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut folder = ImageFolder::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file = Some((data.to_vec(), content_type));
            }
            "folder" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read folder field: {}", e))
                })?;
                folder = ImageFolder::parse(&text)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown folder '{}'", text)))?;
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let (data, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let url = service.upload(folder, data, &content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(UploadedImageDto { url }),
            Some("Image uploaded successfully".to_string()),
            None,
        )),
    ))
}
