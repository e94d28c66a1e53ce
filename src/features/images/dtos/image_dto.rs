use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload image request DTO for OpenAPI documentation
/// Note: the handler reads the multipart form directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload (jpeg, png, gif or webp, up to 5 MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// "submissions" (default) or "heads"
    #[schema(example = "heads")]
    pub folder: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadedImageDto {
    /// Durable URL to store on the submission or organizer
    pub url: String,
}
