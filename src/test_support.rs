//! In-memory backend double used by the controller tests

use std::cell::RefCell;
use std::collections::HashMap;

use crate::api::types::{ObjectListing, ServiceStatus, TransferKind, TransferRequest, UploadFile};
use crate::api::StorageApi;
use crate::app::Confirm;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    ListBuckets,
    ListObjects { bucket: String, prefix: String },
    CreateBucket(String),
    DeleteBucket(String),
    CreateFolder { bucket: String, folder: String },
    DeleteFolder { bucket: String, folder: String },
    DeleteFile { bucket: String, key: String },
    Transfer(TransferKind, TransferRequest),
    Upload { bucket: String, key: String, name: String },
}

/// Records every call; mutations succeed unless a failure was scripted for
/// the key (or bucket name) they touch.
pub struct FakeApi {
    calls: RefCell<Vec<Call>>,
    status: RefCell<Result<ServiceStatus, ApiError>>,
    buckets: RefCell<Result<Vec<String>, ApiError>>,
    listings: RefCell<HashMap<(String, String), Result<ObjectListing, ApiError>>>,
    failures: RefCell<HashMap<String, ApiError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            status: RefCell::new(Ok(ServiceStatus {
                status: "configured".to_string(),
                ..Default::default()
            })),
            buckets: RefCell::new(Ok(Vec::new())),
            listings: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_buckets(self, names: &[&str]) -> Self {
        *self.buckets.borrow_mut() = Ok(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_listing(self, bucket: &str, prefix: &str, folders: &[&str], files: &[&str]) -> Self {
        self.set_listing(bucket, prefix, folders, files);
        self
    }

    pub fn set_listing(&self, bucket: &str, prefix: &str, folders: &[&str], files: &[&str]) {
        let listing = ObjectListing {
            folders: folders.iter().map(|s| s.to_string()).collect(),
            files: files.iter().map(|s| s.to_string()).collect(),
            error: None,
        };
        self.listings
            .borrow_mut()
            .insert((bucket.to_string(), prefix.to_string()), Ok(listing));
    }

    pub fn fail_listing(&self, bucket: &str, prefix: &str, error: ApiError) {
        self.listings
            .borrow_mut()
            .insert((bucket.to_string(), prefix.to_string()), Err(error));
    }

    pub fn set_status(&self, status: Result<ServiceStatus, ApiError>) {
        *self.status.borrow_mut() = status;
    }

    pub fn set_buckets(&self, buckets: Result<Vec<String>, ApiError>) {
        *self.buckets.borrow_mut() = buckets;
    }

    /// Make the mutation touching `target` fail with `error`
    pub fn fail(&self, target: &str, error: ApiError) {
        self.failures.borrow_mut().insert(target.to_string(), error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn listing_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::ListObjects { .. }))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    async fn mutate(&self, target: &str, message: &str) -> Result<String, ApiError> {
        // Let sibling requests interleave the way independent network calls would
        tokio::task::yield_now().await;
        match self.failures.borrow().get(target) {
            Some(error) => Err(error.clone()),
            None => Ok(message.to_string()),
        }
    }
}

impl StorageApi for FakeApi {
    async fn status(&self) -> Result<ServiceStatus, ApiError> {
        self.record(Call::Status);
        self.status.borrow().clone()
    }

    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        self.record(Call::ListBuckets);
        self.buckets.borrow().clone()
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<ObjectListing, ApiError> {
        self.record(Call::ListObjects {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        });
        tokio::task::yield_now().await;
        self.listings
            .borrow()
            .get(&(bucket.to_string(), prefix.to_string()))
            .cloned()
            .unwrap_or_else(|| Ok(ObjectListing::default()))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<String, ApiError> {
        self.record(Call::CreateBucket(bucket.to_string()));
        self.mutate(bucket, "Bucket created successfully").await
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<String, ApiError> {
        self.record(Call::DeleteBucket(bucket.to_string()));
        self.mutate(bucket, "Bucket deleted").await
    }

    async fn create_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError> {
        self.record(Call::CreateFolder {
            bucket: bucket.to_string(),
            folder: folder.to_string(),
        });
        self.mutate(folder, "Folder created").await
    }

    async fn delete_folder(&self, bucket: &str, folder: &str) -> Result<String, ApiError> {
        self.record(Call::DeleteFolder {
            bucket: bucket.to_string(),
            folder: folder.to_string(),
        });
        self.mutate(folder, "Folder deleted").await
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> Result<String, ApiError> {
        self.record(Call::DeleteFile {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.mutate(key, "File deleted").await
    }

    async fn transfer(&self, kind: TransferKind, request: &TransferRequest) -> Result<String, ApiError> {
        self.record(Call::Transfer(kind, request.clone()));
        let message = match kind {
            TransferKind::Copy => "File copied",
            TransferKind::Move => "File moved",
        };
        self.mutate(&request.src_key, message).await
    }

    async fn upload(&self, bucket: &str, key: &str, file: UploadFile) -> Result<String, ApiError> {
        self.record(Call::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            name: file.name,
        });
        self.mutate(key, "File uploaded").await
    }
}

/// Confirmation double: answers with a fixed value and remembers the prompts
pub struct ScriptedConfirm {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}
