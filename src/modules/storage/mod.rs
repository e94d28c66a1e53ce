//! Object storage for uploaded images
//!
//! Provides a MinIO/S3-compatible client for uploads and public URLs.

mod minio_client;

pub use minio_client::MinIOClient;
