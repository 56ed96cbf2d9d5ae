//! User settings slot
//!
//! The second durable key: a small camelCase JSON object, loaded with
//! per-field defaults so old or partial files keep working.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::error::Result;

/// File name of the settings slot inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::Auto => write!(f, "auto"),
        }
    }
}

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_theme")]
    pub theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

fn default_username() -> String {
    "User".to_string()
}

fn default_theme() -> Theme {
    Theme::Light
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: default_username(),
            theme: default_theme(),
            language: default_language(),
            notifications: true,
            auto_save: true,
        }
    }
}

/// Store for the settings slot
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store at the default data location
    pub fn new() -> anyhow::Result<Self> {
        let data_dir = crate::config::data_dir()?;
        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        Ok(Self {
            path: data_dir.join(SETTINGS_FILE),
        })
    }

    /// Create with a custom slot path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load settings; a missing or unparseable slot yields the defaults
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(
                    "Settings slot at {} is corrupt ({}), using defaults",
                    self.path.display(),
                    e
                );
                Ok(Settings::default())
            }
        }
    }

    /// Persist settings, overwriting the slot
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Delete the slot file entirely (used by the reset flow)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
