use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::storage::MinIOClient;

/// Allowed MIME types for image uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Maximum image size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Where an uploaded image is filed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFolder {
    /// Cover image of a project or event
    #[default]
    Submissions,
    /// Organizer photos
    Heads,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFolder::Submissions => "submissions",
            ImageFolder::Heads => "heads",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "submissions" => Some(ImageFolder::Submissions),
            "heads" => Some(ImageFolder::Heads),
            _ => None,
        }
    }
}

/// Binary storage that hands back a durable URL for each object
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String>;
}

#[async_trait]
impl ImageStore for MinIOClient {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let key = self.object_key(folder, file_name);
        let key = MinIOClient::upload(self, &key, data, content_type).await?;
        Ok(self.get_file_url(&key))
    }
}

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

pub struct ImageService {
    store: Arc<dyn ImageStore>,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    /// Check type and size, then store under a fresh uuid-named key.
    ///
    /// A retried upload therefore never overwrites an earlier image.
    pub async fn upload(
        &self,
        folder: ImageFolder,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let content_type = content_type.trim().to_lowercase();

        if !is_image_type_allowed(&content_type) {
            return Err(AppError::Validation(format!(
                "Image type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }
        if data.is_empty() {
            return Err(AppError::Validation("Image is empty".to_string()));
        }
        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::Validation(format!(
                "Image too large. Maximum size is {} MB",
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), extension_for(&content_type));
        let size = data.len();
        let url = self
            .store
            .upload(folder.as_str(), &file_name, data, &content_type)
            .await?;

        tracing::info!(
            "Uploaded image {} ({} bytes) to {}",
            file_name,
            size,
            folder.as_str()
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        uploads: Mutex<Vec<(String, String, usize)>>,
        fail: bool,
    }

    #[async_trait]
    impl ImageStore for RecordingStore {
        async fn upload(
            &self,
            folder: &str,
            file_name: &str,
            data: Vec<u8>,
            _content_type: &str,
        ) -> Result<String> {
            if self.fail {
                return Err(AppError::Upload("connection reset".to_string()));
            }
            self.uploads.lock().unwrap().push((
                folder.to_string(),
                file_name.to_string(),
                data.len(),
            ));
            Ok(format!("https://cdn.example.org/{}/{}", folder, file_name))
        }
    }

    #[tokio::test]
    async fn test_upload_returns_url_under_folder() {
        let store = Arc::new(RecordingStore::default());
        let service = ImageService::new(store.clone());

        let url = service
            .upload(ImageFolder::Heads, vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert!(url.starts_with("https://cdn.example.org/heads/"));
        assert!(url.ends_with(".png"));
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].2, 3);
    }

    #[tokio::test]
    async fn test_retried_upload_uses_fresh_name() {
        let store = Arc::new(RecordingStore::default());
        let service = ImageService::new(store.clone());

        let first = service
            .upload(ImageFolder::Submissions, vec![7], "image/jpeg")
            .await
            .unwrap();
        let second = service
            .upload(ImageFolder::Submissions, vec![7], "image/jpeg")
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_rejects_bad_type_and_size() {
        let store = Arc::new(RecordingStore::default());
        let service = ImageService::new(store.clone());

        let pdf = service
            .upload(ImageFolder::Submissions, vec![1], "application/pdf")
            .await;
        assert!(matches!(pdf, Err(AppError::Validation(_))));

        let empty = service
            .upload(ImageFolder::Submissions, Vec::new(), "image/png")
            .await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let huge = service
            .upload(
                ImageFolder::Submissions,
                vec![0; MAX_IMAGE_SIZE + 1],
                "image/webp",
            )
            .await;
        assert!(matches!(huge, Err(AppError::Validation(_))));

        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exactly_max_size_is_accepted() {
        let service = ImageService::new(Arc::new(RecordingStore::default()));
        let url = service
            .upload(ImageFolder::Heads, vec![0; MAX_IMAGE_SIZE], "image/jpg")
            .await
            .unwrap();
        assert!(url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_store_failure_is_transient() {
        let service = ImageService::new(Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        }));
        let err = service
            .upload(ImageFolder::Heads, vec![1], "image/gif")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_folder_parse() {
        assert_eq!(ImageFolder::parse("Heads"), Some(ImageFolder::Heads));
        assert_eq!(ImageFolder::parse("avatars"), None);
    }
}
