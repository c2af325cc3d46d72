//! Declarative rendering: client state in, plain view model out

use std::fmt;

use crate::dialog::Form;
use crate::notify::Banner;
use crate::state::{ClientState, Crumb, EntryKind};

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub buckets: Vec<BucketRow>,
    pub breadcrumb: Vec<Crumb>,
    pub rows: Vec<Row>,
    pub banners: Vec<Banner>,
    pub dialog: Option<DialogView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRow {
    pub name: String,
    pub active: bool,
}

/// One line of the file list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub kind: EntryKind,
    /// `None` for the ".." row
    pub key: Option<String>,
    pub size: String,
    pub selected: bool,
    pub parent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub notice: Option<String>,
    pub fields: Vec<(String, String)>,
    pub submit: String,
}

pub fn render(state: &ClientState, banners: Vec<Banner>) -> View {
    let active = state.navigation.bucket();

    let buckets = state
        .buckets
        .iter()
        .map(|name| BucketRow {
            name: name.clone(),
            active: active == Some(name.as_str()),
        })
        .collect();

    let mut rows = Vec::with_capacity(state.entries.len() + 1);
    if active.is_some() {
        if !state.navigation.prefix().is_empty() {
            rows.push(Row {
                name: "..".to_string(),
                kind: EntryKind::Folder,
                key: None,
                size: String::new(),
                selected: false,
                parent: true,
            });
        }

        rows.extend(state.entries.iter().map(|entry| Row {
            name: entry.name.clone(),
            kind: entry.kind,
            key: Some(entry.key.clone()),
            size: entry.size_string(),
            selected: state.selection.contains(&entry.key),
            parent: false,
        }));
    }

    View {
        buckets,
        breadcrumb: state.navigation.breadcrumbs(),
        rows,
        banners,
        dialog: state.modal.form().map(dialog_view),
    }
}

fn dialog_view(form: &Form) -> DialogView {
    let fields = match form {
        Form::NewFolder => vec![("Folder name".to_string(), String::new())],
        Form::NewBucket => vec![("Bucket name".to_string(), String::new())],
        Form::DeleteBucket => vec![("Bucket name to delete".to_string(), String::new())],
        Form::Transfer {
            dest_bucket,
            dest_path,
            ..
        } => vec![
            ("Destination Bucket".to_string(), dest_bucket.clone()),
            ("Destination Path".to_string(), dest_path.clone()),
        ],
    };

    DialogView {
        title: form.title().to_string(),
        notice: form.notice().map(str::to_string),
        fields,
        submit: form.submit_label().to_string(),
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Buckets:")?;
        if self.buckets.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for bucket in &self.buckets {
            let marker = if bucket.active { '>' } else { ' ' };
            writeln!(f, " {} {}", marker, bucket.name)?;
        }

        if self.breadcrumb.is_empty() {
            writeln!(f, "\nNo bucket selected")?;
        } else {
            let path: Vec<String> = self
                .breadcrumb
                .iter()
                .enumerate()
                .map(|(i, crumb)| format!("[{}] {}", i, crumb.label))
                .collect();
            writeln!(f, "\n{}", path.join(" / "))?;
            writeln!(f, "{}", "─".repeat(60))?;

            if self.rows.is_empty() {
                writeln!(f, "  (empty)")?;
            }
            for row in &self.rows {
                let marker = if row.selected { '*' } else { ' ' };
                let icon = match (row.parent, row.kind) {
                    (true, _) => "^",
                    (false, EntryKind::Folder) => "d",
                    (false, EntryKind::File) => "-",
                };
                writeln!(f, "{} {} {:<44} {:>12}", marker, icon, row.name, row.size)?;
            }
        }

        if let Some(dialog) = &self.dialog {
            writeln!(f, "\n┌ {} ", dialog.title)?;
            if let Some(notice) = &dialog.notice {
                writeln!(f, "│ {}", notice)?;
            }
            for (label, value) in &dialog.fields {
                writeln!(f, "│ {}: {}", label, value)?;
            }
            writeln!(f, "└ [{}]", dialog.submit)?;
        }

        Ok(())
    }
}
