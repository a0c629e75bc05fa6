//! Persistent settings: theme key, discovery command and refresh interval.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/mlx-cockpit/settings.json (fallback ~/.config/mlx-cockpit/settings.json)

use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file unreadable: {0}")]
    Io(#[from] io::Error),
    #[error("settings file malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SettingsFile {
    #[serde(default)]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
}

/// Source of the persisted theme key. Implementations may fail; callers fall back.
pub trait ThemeStore {
    fn theme_key(&self) -> Result<Option<String>, SettingsError>;
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("mlx-cockpit")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mlx-cockpit")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// File-backed settings. The file is re-read on every lookup so external edits apply
/// on the next refresh.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(settings_path())
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<SettingsFile, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SettingsFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load, treating a missing or corrupt file as defaults.
    pub fn load(&self) -> SettingsFile {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring settings file");
            SettingsFile::default()
        })
    }

    pub fn save(&self, s: &SettingsFile) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(s)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Apply `edit` to the stored settings and write them back only if something changed.
    pub fn update(&self, edit: impl FnOnce(&mut SettingsFile)) -> Result<bool, SettingsError> {
        let before = self.load();
        let mut after = before.clone();
        edit(&mut after);
        if after == before {
            return Ok(false);
        }
        self.save(&after)?;
        Ok(true)
    }
}

impl ThemeStore for SettingsStore {
    fn theme_key(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.try_load()?.theme)
    }
}
