//! Storage backend access
//!
//! This module provides:
//! - [`StorageApi`] - the operations the file manager needs from the backend
//! - [`client::HttpClient`] - implementation over the backend's REST endpoints
//! - [`types`] - wire types (listing, status, request bodies)

pub mod client;
pub mod types;

pub use client::HttpClient;
pub use types::{ObjectListing, ServiceStatus, TransferKind, TransferRequest, UploadFile};

use crate::error::ApiError;

/// Operations exposed by the storage backend.
///
/// Mutating calls resolve to the backend's success message.
#[allow(async_fn_in_trait)]
pub trait StorageApi {
    async fn status(&self) -> Result<ServiceStatus, ApiError>;

    async fn list_buckets(&self) -> Result<Vec<String>, ApiError>;

    /// Folders (keys ending in `/`) and files directly under `prefix`
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<ObjectListing, ApiError>;

    async fn create_bucket(&self, bucket: &str) -> Result<String, ApiError>;

    async fn delete_bucket(&self, bucket: &str) -> Result<String, ApiError>;

    async fn create_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError>;

    async fn delete_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError>;

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<String, ApiError>;

    /// Copy or move a single object
    async fn transfer(&self, kind: TransferKind, request: &TransferRequest) -> Result<String, ApiError>;

    async fn upload(&self, bucket: &str, key: &str, file: UploadFile) -> Result<String, ApiError>;
}
