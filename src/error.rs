//! Error types for backend calls and client-side validation

use thiserror::Error;

/// Failure of a single backend request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset...)
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered without a `message`, optionally carrying its `error` text
    #[error("{}", .0.as_deref().unwrap_or("request rejected"))]
    Rejected(Option<String>),

    /// The response body was not the JSON we expected
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text the backend reported, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(Some(msg)) => Some(msg),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Backend text when present, otherwise the operation's fallback message
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Bucket name rejected before any request is made.
///
/// Variants are listed in the order the rules are checked; the first failing
/// rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BucketNameError {
    #[error("Bucket name is required")]
    Empty,

    #[error("Bucket name cannot contain uppercase letters. Please use only lowercase letters.")]
    Uppercase,

    #[error("Bucket name must be 3-63 characters long")]
    Length,

    #[error("Bucket name can only contain lowercase letters, numbers, and hyphens. It must start and end with a letter or number.")]
    Format,
}
