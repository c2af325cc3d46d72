//! Multi-selection over the rendered entries

use std::collections::HashMap;

use crate::state::listing::EntryKind;

/// A selected entry as remembered for bulk actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    pub path: String,
    pub kind: EntryKind,
}

/// Keys of the currently selected entries.
///
/// The view derives its selection markers from this set, so the two cannot
/// drift apart.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    items: HashMap<String, SelectedItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain click replaces the selection; additive (ctrl) click toggles one entry
    pub fn select(&mut self, path: &str, kind: EntryKind, additive: bool) {
        if additive {
            if self.items.remove(path).is_none() {
                self.insert(path, kind);
            }
        } else {
            self.items.clear();
            self.insert(path, kind);
        }
    }

    fn insert(&mut self, path: &str, kind: EntryKind) {
        self.items.insert(
            path.to_string(),
            SelectedItem {
                path: path.to_string(),
                kind,
            },
        );
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.items.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every key that `keep` rejects
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.items.retain(|path, _| keep(path));
    }

    pub fn items(&self) -> impl Iterator<Item = &SelectedItem> {
        self.items.values()
    }

    /// Owned copy of the selection, for handing to spawned requests
    pub fn snapshot(&self) -> Vec<SelectedItem> {
        let mut items: Vec<SelectedItem> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.path.cmp(&b.path));
        items
    }
}
