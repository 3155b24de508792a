//! Viewer preferences.
//!
//! Defaults are layered with an optional JSON file under the user config
//! directory and `RECHTSFORM_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mixed::{DEFAULT_BASE, DEFAULT_INSERTION};

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "rechtsform";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "RECHTSFORM";

/// Preferences shared by every frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// List English translations instead of German names.
    pub show_translations: bool,
    /// List alternates next to their base instead of behind it.
    pub show_variants: bool,
    /// Mark categories with patterns in addition to colors.
    pub differentiate_without_color: bool,
    /// Base company preselected in the mixed-forms builder.
    pub mixed_base: String,
    /// Inserted company preselected in the mixed-forms builder.
    pub mixed_insertion: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_translations: false,
            show_variants: false,
            differentiate_without_color: false,
            mixed_base: DEFAULT_BASE.to_string(),
            mixed_insertion: DEFAULT_INSERTION.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path`; a missing file yields the defaults (plus environment).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                Config::try_from(&AppConfig::default())
                    .context("failed to seed configuration defaults")?,
            )
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration {}", path.display()))
    }

    /// Write the preferences to `path`, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize configuration")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write configuration {}", path.display()))
    }
}

/// Default configuration file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration unless a file already exists.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_config_at(&path)?;
    Ok(path)
}

fn ensure_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    info!("writing default configuration to {}", path.display());
    AppConfig::default().persist(path)
}
