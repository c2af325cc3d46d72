//! Bucket name rules and backend error mapping

use crate::error::BucketNameError;

pub const MIN_BUCKET_NAME_LEN: usize = 3;
pub const MAX_BUCKET_NAME_LEN: usize = 63;

/// Check a bucket name, returning the trimmed name on success.
///
/// Rules run in a fixed order and the first failure is reported:
/// emptiness, uppercase letters, length, then character set / edges.
pub fn validate_bucket_name(raw: &str) -> Result<&str, BucketNameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(BucketNameError::Empty);
    }

    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(BucketNameError::Uppercase);
    }

    let len = name.chars().count();
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(BucketNameError::Length);
    }

    if !has_valid_shape(name) {
        return Err(BucketNameError::Format);
    }

    Ok(name)
}

/// `^[a-z0-9][a-z0-9-]*[a-z0-9]$`
fn has_valid_shape(name: &str) -> bool {
    let edge = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let inner = |c: char| edge(c) || c == '-';

    let mut chars = name.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return false;
    };

    edge(first) && edge(last) && chars.all(inner)
}

/// Turn a backend bucket-creation error into friendlier text
pub fn map_create_bucket_error(backend: &str) -> String {
    if backend.contains("not available") {
        "Bucket name already taken. Please choose a different name.".to_string()
    } else if backend.contains("InvalidBucketName") {
        "Invalid bucket name format. Use only lowercase letters, numbers, and hyphens.".to_string()
    } else {
        backend.to_string()
    }
}
