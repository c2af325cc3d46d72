//! Current location within the virtual folder tree

/// `(current bucket, current prefix)`.
///
/// The prefix is always empty or ends with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    bucket: Option<String>,
    prefix: String,
}

/// One clickable breadcrumb segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Prefix to navigate to when the segment is clicked
    pub target: String,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Open a bucket at its root
    pub fn enter_bucket(&mut self, bucket: &str) {
        self.bucket = Some(bucket.to_string());
        self.prefix.clear();
    }

    /// Move to `prefix` within the current bucket
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = normalize_prefix(prefix);
    }

    /// Back to "no bucket selected"
    pub fn reset(&mut self) {
        self.bucket = None;
        self.prefix.clear();
    }

    pub fn is_at(&self, bucket: &str, prefix: &str) -> bool {
        self.bucket.as_deref() == Some(bucket) && self.prefix == prefix
    }

    pub fn parent_prefix(&self) -> String {
        parent_prefix(&self.prefix)
    }

    /// Bucket root followed by one segment per path component
    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        let Some(bucket) = &self.bucket else {
            return Vec::new();
        };

        let mut crumbs = vec![Crumb {
            label: bucket.clone(),
            target: String::new(),
        }];

        let mut path = String::new();
        for part in self.prefix.split('/').filter(|p| !p.is_empty()) {
            path.push_str(part);
            path.push('/');
            crumbs.push(Crumb {
                label: part.to_string(),
                target: path.clone(),
            });
        }

        crumbs
    }

    /// `key` with the current prefix removed from its start
    pub fn relative_key<'a>(&self, key: &'a str) -> &'a str {
        key.strip_prefix(self.prefix.as_str()).unwrap_or(key)
    }
}

/// Parent of a prefix: the last non-empty component is dropped
pub fn parent_prefix(prefix: &str) -> String {
    let mut parts: Vec<&str> = prefix.split('/').filter(|p| !p.is_empty()).collect();
    parts.pop();

    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_prefix_empty() {
        assert_eq!(parent_prefix(""), "");
    }

    #[test]
    fn test_parent_prefix_root_folder() {
        assert_eq!(parent_prefix("a/"), "");
    }

    #[test]
    fn test_parent_prefix_nested() {
        assert_eq!(parent_prefix("a/b/"), "a/");
    }

    #[test]
    fn test_parent_prefix_deep_nested() {
        assert_eq!(
            parent_prefix("level1/level2/level3/level4/"),
            "level1/level2/level3/"
        );
    }

    #[test]
    fn test_parent_prefix_ignores_empty_segments() {
        assert_eq!(parent_prefix("a//b/"), "a/");
    }

    #[test]
    fn test_enter_bucket_resets_prefix() {
        let mut nav = Navigation::new();
        nav.enter_bucket("photos");
        nav.set_prefix("2024/");
        nav.enter_bucket("docs");
        assert_eq!(nav.bucket(), Some("docs"));
        assert_eq!(nav.prefix(), "");
    }

    #[test]
    fn test_set_prefix_adds_trailing_slash() {
        let mut nav = Navigation::new();
        nav.enter_bucket("b");
        nav.set_prefix("a/b");
        assert_eq!(nav.prefix(), "a/b/");
        nav.set_prefix("");
        assert_eq!(nav.prefix(), "");
    }

    #[test]
    fn test_reset() {
        let mut nav = Navigation::new();
        nav.enter_bucket("b");
        nav.set_prefix("x/");
        nav.reset();
        assert_eq!(nav.bucket(), None);
        assert_eq!(nav.prefix(), "");
    }

    #[test]
    fn test_breadcrumbs_root() {
        let mut nav = Navigation::new();
        assert!(nav.breadcrumbs().is_empty());

        nav.enter_bucket("media");
        assert_eq!(
            nav.breadcrumbs(),
            vec![Crumb {
                label: "media".to_string(),
                target: String::new()
            }]
        );
    }

    #[test]
    fn test_breadcrumbs_cumulative_targets() {
        let mut nav = Navigation::new();
        nav.enter_bucket("media");
        nav.set_prefix("a/b/c/");

        let crumbs = nav.breadcrumbs();
        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        let targets: Vec<&str> = crumbs.iter().map(|c| c.target.as_str()).collect();

        assert_eq!(labels, vec!["media", "a", "b", "c"]);
        assert_eq!(targets, vec!["", "a/", "a/b/", "a/b/c/"]);
    }

    #[test]
    fn test_relative_key() {
        let mut nav = Navigation::new();
        nav.enter_bucket("b");
        nav.set_prefix("docs/");
        assert_eq!(nav.relative_key("docs/readme.txt"), "readme.txt");
        assert_eq!(nav.relative_key("docs/reports/"), "reports/");
        assert_eq!(nav.relative_key("other/file"), "other/file");
    }
}
