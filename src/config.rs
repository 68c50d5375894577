//! Host application settings.
//!
//! The persistence core never reads these: [`NoteStore`] takes its
//! directory explicitly. This module is for hosts that want the usual
//! per-user settings file with a notes folder and editor preferences.
//!
//! [`NoteStore`]: crate::store::NoteStore

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings loaded from the per-user settings file.
///
/// Missing keys fall back to their defaults and unknown keys are ignored,
/// so old settings files keep working across upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the note store operates on.
    pub notes_dir: PathBuf,

    /// Editor font size in points.
    pub font_size: u32,

    /// "light" or "dark".
    pub theme: String,

    /// Editor auto-save interval in milliseconds.
    pub autosave_interval_ms: u64,

    /// Live preview refresh delay in milliseconds.
    pub preview_update_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notes_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Markbook")
                .join("Notes"),
            font_size: 12,
            theme: "light".to_string(),
            autosave_interval_ms: 2000,
            preview_update_delay_ms: 500,
        }
    }
}

impl Settings {
    /// Loads settings from the default settings file location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    /// Saves settings to the default settings file location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Saves settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write settings file: {}", path.display()))
    }

    /// Returns the path to the settings file.
    ///
    /// Default: `~/.config/markbook/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("markbook")
            .join("config.toml")
    }
}
