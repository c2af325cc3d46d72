//! Entries rendered for one folder level

use serde::{Deserialize, Serialize};

use crate::api::ObjectListing;

/// Inferred type of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Folders are keys ending in `/`
    pub fn of_key(key: &str) -> Self {
        if key.ends_with('/') {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }
}

/// A folder or file at the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Full key, including the prefix
    pub key: String,
    pub name: String,
    pub kind: EntryKind,
    /// Display only; `/objects` does not report sizes, so listings leave it unset
    pub size: Option<u64>,
}

impl Entry {
    pub fn folder(prefix: &str, key: &str) -> Self {
        let relative = key.strip_prefix(prefix).unwrap_or(key);
        let name = relative.strip_suffix('/').unwrap_or(relative);
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind: EntryKind::Folder,
            size: None,
        }
    }

    pub fn file(prefix: &str, key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.strip_prefix(prefix).unwrap_or(key).to_string(),
            kind: EntryKind::File,
            size: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Size column: `-` for folders, blank when the size is unknown
    pub fn size_string(&self) -> String {
        if self.is_folder() {
            return String::from("-");
        }

        self.size.map(|size| format!("{} B", size)).unwrap_or_default()
    }
}

/// Folders first, then files, in the order the backend returned them
pub fn entries_from_listing(prefix: &str, listing: &ObjectListing) -> Vec<Entry> {
    let folders = listing.folders.iter().map(|key| Entry::folder(prefix, key));
    let files = listing.files.iter().map(|key| Entry::file(prefix, key));
    folders.chain(files).collect()
}
