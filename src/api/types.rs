//! Wire types for the storage backend's JSON endpoints

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Reply of `GET /status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
}

impl ServiceStatus {
    pub fn is_configured(&self) -> bool {
        self.status == "configured"
    }

    /// User-facing warning for a backend that is not configured
    pub fn warning(&self) -> String {
        let mut msg = String::from("Storage backend not configured properly.");
        if let Some(error) = &self.error {
            msg.push_str(&format!(" Error: {}", error));
        }
        if let Some(region) = &self.region {
            msg.push_str(&format!(" Region: {}", region));
        }
        if let Some(access_key) = &self.access_key {
            msg.push_str(&format!(" Access Key: {}", access_key));
        }
        msg
    }
}

/// Reply of `GET /buckets`: either the names or an error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketsReply {
    Names(Vec<String>),
    Failed { error: String },
}

/// Reply of `GET /objects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectListing {
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply of every mutating endpoint: `{message}` on success, `{error}` otherwise
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionReply {
    /// A reply counts as success only when it carries a `message`
    pub fn into_result(self) -> Result<String, ApiError> {
        match self.message {
            Some(message) => Ok(message),
            None => Err(ApiError::Rejected(self.error)),
        }
    }
}

/// Body of `/bucket/create` and `/bucket/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRequest {
    pub bucket: String,
}

/// Body of `/folder/create` and `/folder/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRequest {
    pub bucket: String,
    pub folder: String,
}

/// Body of `/file/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    pub bucket: String,
    pub key: String,
}

/// Body of `/copy` and `/move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub src_bucket: String,
    pub src_key: String,
    pub dest_bucket: String,
    pub dest_key: String,
}

/// Which of the two transfer endpoints to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    Copy,
    Move,
}

impl TransferKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            TransferKind::Copy => "copy",
            TransferKind::Move => "move",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TransferKind::Copy => "Copy Items",
            TransferKind::Move => "Move Items",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            TransferKind::Copy => "Copy failed",
            TransferKind::Move => "Move failed",
        }
    }
}

/// A local file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_configured() {
        let status: ServiceStatus =
            serde_json::from_str(r#"{"status": "configured", "region": "eu-west-1"}"#).unwrap();
        assert!(status.is_configured());
    }

    #[test]
    fn test_status_warning_lists_present_fields() {
        let status: ServiceStatus = serde_json::from_str(
            r#"{"status": "error", "error": "no credentials", "access_key": "AKIA****"}"#,
        )
        .unwrap();
        assert!(!status.is_configured());
        assert_eq!(
            status.warning(),
            "Storage backend not configured properly. Error: no credentials Access Key: AKIA****"
        );
    }

    #[test]
    fn test_buckets_reply_names() {
        let reply: BucketsReply = serde_json::from_str(r#"["alpha", "beta"]"#).unwrap();
        assert_eq!(
            reply,
            BucketsReply::Names(vec!["alpha".to_string(), "beta".to_string()])
        );
    }

    #[test]
    fn test_buckets_reply_error() {
        let reply: BucketsReply = serde_json::from_str(r#"{"error": "AccessDenied"}"#).unwrap();
        assert_eq!(
            reply,
            BucketsReply::Failed {
                error: "AccessDenied".to_string()
            }
        );
    }

    #[test]
    fn test_listing_missing_fields_default_to_empty() {
        let listing: ObjectListing = serde_json::from_str(r#"{"folders": ["a/"]}"#).unwrap();
        assert_eq!(listing.folders, vec!["a/"]);
        assert!(listing.files.is_empty());
        assert!(listing.error.is_none());
    }

    #[test]
    fn test_action_reply_message_is_success() {
        let reply: ActionReply = serde_json::from_str(r#"{"message": "File copied"}"#).unwrap();
        assert_eq!(reply.into_result(), Ok("File copied".to_string()));
    }

    #[test]
    fn test_action_reply_error_is_rejection() {
        let reply: ActionReply =
            serde_json::from_str(r#"{"error": "Source file does not exist"}"#).unwrap();
        assert_eq!(
            reply.into_result(),
            Err(ApiError::Rejected(Some("Source file does not exist".to_string())))
        );
    }

    #[test]
    fn test_action_reply_empty_is_rejection_without_text() {
        let reply: ActionReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.into_result(), Err(ApiError::Rejected(None)));
    }

    #[test]
    fn test_transfer_request_field_names() {
        let req = TransferRequest {
            src_bucket: "a".to_string(),
            src_key: "docs/x.txt".to_string(),
            dest_bucket: "b".to_string(),
            dest_key: "backup/x.txt".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["src_bucket"], "a");
        assert_eq!(json["src_key"], "docs/x.txt");
        assert_eq!(json["dest_bucket"], "b");
        assert_eq!(json["dest_key"], "backup/x.txt");
    }

    #[test]
    fn test_transfer_kind_labels() {
        assert_eq!(TransferKind::Copy.endpoint(), "copy");
        assert_eq!(TransferKind::Move.title(), "Move Items");
        assert_eq!(TransferKind::Move.failure_message(), "Move failed");
    }
}
