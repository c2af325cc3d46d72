//! Client configuration
//!
//! Read from the platform-specific config folder:
//! - Linux: ~/.config/s3-filemanager/settings.json
//! - Windows: %APPDATA%/s3-filemanager/settings.json
//! - macOS: ~/Library/Application Support/s3-filemanager/settings.json
//!
//! Only configuration lives here; the browsing session itself is never saved.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides `server_url` from the settings file
pub const SERVER_URL_ENV: &str = "S3FM_SERVER_URL";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_BANNER_TTL_SECS: u64 = 3;
const MIN_BANNER_TTL_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the storage backend's HTTP API
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Seconds a notification banner stays visible
    #[serde(default = "default_banner_ttl")]
    pub banner_ttl_secs: u64,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_banner_ttl() -> u64 {
    DEFAULT_BANNER_TTL_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            banner_ttl_secs: default_banner_ttl(),
        }
    }
}

impl Settings {
    /// Load settings from the config folder, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::info!(
            "Loaded settings: server={}, banner_ttl={}s",
            settings.server_url,
            settings.banner_ttl_secs
        );

        Ok(settings)
    }

    /// Save settings to the config folder
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        tracing::debug!("Saved settings to {:?}", path);

        Ok(())
    }

    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "s3-filemanager", "s3-filemanager")
            .context("Failed to determine settings directory")?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Apply overrides: environment first, then an explicit value (e.g. a CLI argument)
    pub fn with_overrides(mut self, env_url: Option<String>, explicit_url: Option<String>) -> Self {
        if let Some(url) = explicit_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            self.server_url = url;
        }
        self
    }

    /// Banner lifetime; never shorter than one second
    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_ttl_secs.max(MIN_BANNER_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://127.0.0.1:5000/");
        assert_eq!(settings.banner_ttl(), Duration::from_secs(3));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            server_url: "http://storage.internal:8080/".to_string(),
            banner_ttl_secs: 5,
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"server_url": "http://example.test/"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.server_url, "http://example.test/");
        assert_eq!(settings.banner_ttl_secs, 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn test_zero_banner_ttl_is_clamped() {
        let settings: Settings = serde_json::from_str(r#"{"banner_ttl_secs": 0}"#).unwrap();
        assert_eq!(settings.banner_ttl(), Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let base = Settings::default();

        let from_env = base
            .clone()
            .with_overrides(Some("http://env.test/".to_string()), None);
        assert_eq!(from_env.server_url, "http://env.test/");

        let from_arg = base.clone().with_overrides(
            Some("http://env.test/".to_string()),
            Some("http://arg.test/".to_string()),
        );
        assert_eq!(from_arg.server_url, "http://arg.test/");

        let blank = base.with_overrides(Some("  ".to_string()), None);
        assert_eq!(blank.server_url, "http://127.0.0.1:5000/");
    }
}
