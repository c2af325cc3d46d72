//! S3 File Manager Library
//!
//! Client-side core of a file manager for an object-storage backend: the
//! backend API client, the navigation/selection state machine and the
//! controller that ties them to user events. The terminal front-end lives in
//! the binary.

pub mod api;
pub mod app;
pub mod dialog;
pub mod error;
pub mod events;
pub mod notify;
pub mod settings;
pub mod state;
pub mod validation;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app::{App, Batch, BatchReport, Confirm};
pub use error::{ApiError, BucketNameError};
