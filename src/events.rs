//! User interactions as data, routed through [`crate::app::App::dispatch`]

use crate::api::{TransferKind, UploadFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Reload the sidebar bucket list
    LoadBuckets,
    /// Sidebar click: open a bucket at its root
    BucketClicked(String),
    /// Click on an entry; `additive` is the ctrl modifier
    EntryClicked { key: String, additive: bool },
    /// Double-activation of an entry (descends into folders)
    EntryActivated(String),
    /// Double-activation of the ".." entry
    ParentActivated,
    /// Breadcrumb segment; index 0 is the bucket root
    CrumbClicked(usize),
    Refresh,

    NewFolderRequested,
    NewBucketRequested,
    DeleteBucketRequested,
    /// Context-menu copy/move: opens the destination dialog
    TransferRequested(TransferKind),
    /// Context-menu delete over the selection
    DeleteSelectedRequested,
    UploadRequested(Vec<UploadFile>),

    /// Submit of the mounted form
    Submit(FormInput),
    DialogClosed,
    /// A click on the dialog overlay; `on_backdrop` is false inside the surface
    DialogClicked { on_backdrop: bool },
}

/// Values collected by the mounted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Name(String),
    Destination { bucket: String, path: String },
}
