//! Client-side state: where the user is, what is shown, what is selected
//!
//! - [`navigation::Navigation`] - current bucket and prefix, breadcrumbs
//! - [`listing`] - entries derived from a listing reply
//! - [`selection::Selection`] - single/additive selection set

pub mod listing;
pub mod navigation;
pub mod selection;

pub use listing::{Entry, EntryKind};
pub use navigation::{Crumb, Navigation};
pub use selection::{SelectedItem, Selection};

use crate::dialog::Modal;

/// All client state, owned by a single [`crate::app::App`]
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    /// Sidebar bucket names
    pub buckets: Vec<String>,
    pub navigation: Navigation,
    /// Entries of the last successful listing
    pub entries: Vec<Entry>,
    pub selection: Selection,
    pub modal: Modal,
}

impl ClientState {
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }
}
