//! HTTP client for the storage backend

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::types::{
    ActionReply, BucketRequest, BucketsReply, FileRequest, FolderRequest, ObjectListing,
    ServiceStatus, TransferKind, TransferRequest, UploadFile,
};
use crate::api::StorageApi;
use crate::error::ApiError;

/// reqwest-backed implementation of [`StorageApi`]
///
/// No timeout is configured; requests rely on the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpClient {
    /// Create a client for the backend rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::Transport(format!("invalid server URL '{}': {}", base_url, e)))?;

        // Url::join replaces the last path segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("s3-filemanager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).query(query).send().await?;
        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body and interpret the `{message}` / `{error}` reply.
    ///
    /// The status code is not consulted: the backend reports failures in the body.
    async fn post_action<B: Serialize>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let reply = response.json::<ActionReply>().await?;
        if reply.message.is_none() {
            tracing::debug!("POST {} rejected with status {}", path, status);
        }
        reply.into_result()
    }
}

impl StorageApi for HttpClient {
    async fn status(&self) -> Result<ServiceStatus, ApiError> {
        self.get_json("status", &[]).await
    }

    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        match self.get_json::<BucketsReply>("buckets", &[]).await? {
            BucketsReply::Names(names) => Ok(names),
            BucketsReply::Failed { error } => Err(ApiError::Rejected(Some(error))),
        }
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<ObjectListing, ApiError> {
        let listing: ObjectListing = self
            .get_json("objects", &[("bucket", bucket), ("prefix", prefix)])
            .await?;

        match listing.error {
            Some(error) => Err(ApiError::Rejected(Some(error))),
            None => Ok(listing),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<String, ApiError> {
        let body = BucketRequest {
            bucket: bucket.to_string(),
        };
        self.post_action("bucket/create", &body).await
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<String, ApiError> {
        let body = BucketRequest {
            bucket: bucket.to_string(),
        };
        self.post_action("bucket/delete", &body).await
    }

    async fn create_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError> {
        let body = FolderRequest {
            bucket: bucket.to_string(),
            folder: folder.to_string(),
        };
        self.post_action("folder/create", &body).await
    }

    async fn delete_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError> {
        let body = FolderRequest {
            bucket: bucket.to_string(),
            folder: folder.to_string(),
        };
        self.post_action("folder/delete", &body).await
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<String, ApiError> {
        let body = FileRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
        self.post_action("file/delete", &body).await
    }

    async fn transfer(&self, kind: TransferKind, request: &TransferRequest) -> Result<String, ApiError> {
        self.post_action(kind.endpoint(), request).await
    }

    async fn upload(&self, bucket: &str, key: &str, file: UploadFile) -> Result<String, ApiError> {
        let url = self.endpoint("upload")?;
        tracing::debug!("POST {} (multipart, {} bytes)", url, file.data.len());

        let part = Part::stream(file.data).file_name(file.name);
        let form = Form::new()
            .text("bucket", bucket.to_string())
            .text("key", key.to_string())
            .part("file", part);

        let response = self.http.post(url).multipart(form).send().await?;
        response.json::<ActionReply>().await?.into_result()
    }
}
