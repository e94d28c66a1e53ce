use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::images::handlers::upload_image;
use crate::features::images::services::image_service::MAX_IMAGE_SIZE;
use crate::features::images::services::ImageService;

/// Create routes for the images feature
pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route(
            "/api/images/upload",
            // Room for multipart overhead on top of the image itself
            post(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}
