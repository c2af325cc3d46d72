//! Modal dialog: one overlay whose body is swapped per action

use crate::api::TransferKind;

/// The form currently mounted in the dialog body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    NewFolder,
    NewBucket,
    DeleteBucket,
    /// Destination picker for copy/move, pre-filled with the current location
    Transfer {
        kind: TransferKind,
        dest_bucket: String,
        dest_path: String,
    },
}

impl Form {
    pub fn title(&self) -> &'static str {
        match self {
            Form::NewFolder => "New Folder",
            Form::NewBucket => "New Bucket",
            Form::DeleteBucket => "Delete Bucket",
            Form::Transfer { kind, .. } => kind.title(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Form::NewFolder | Form::NewBucket => "Create",
            Form::DeleteBucket => "Delete",
            Form::Transfer {
                kind: TransferKind::Copy,
                ..
            } => "Copy",
            Form::Transfer {
                kind: TransferKind::Move,
                ..
            } => "Move",
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Form::DeleteBucket => Some(
                "Warning: Deleting a bucket will permanently remove all its contents. This action cannot be undone.",
            ),
            _ => None,
        }
    }
}

/// Visibility plus the mounted form; nothing else is kept
#[derive(Debug, Clone, Default)]
pub struct Modal {
    form: Option<Form>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay with `form`, replacing whatever was mounted
    pub fn open(&mut self, form: Form) {
        tracing::debug!("Dialog opened: {}", form.title());
        self.form = Some(form);
    }

    pub fn close(&mut self) {
        if let Some(form) = self.form.take() {
            tracing::debug!("Dialog closed: {}", form.title());
        }
    }

    /// A click landed on the overlay; only the backdrop itself dismisses
    pub fn click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }
}
