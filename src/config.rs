//! Configuration file handling.
//!
//! The config lives at `~/.config/mdsweep/config.toml` (platform
//! equivalent via `dirs`); `MDSWEEP_CONFIG` overrides the location, which
//! the integration tests rely on. A missing file means defaults, and
//! missing keys fall back to their defaults through serde, so configs
//! written by older versions keep working. `migrate_config` brings an old
//! file up to date in place without losing user edits or comments.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cleaner::CleanRules;
use crate::convert::BackendKind;

/// Default subprocess timeout for converter backends.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaner: CleanRules,
    pub converter: ConverterConfig,
}

/// Converter backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub backend: BackendKind,
    /// Seconds to wait for the converter CLI on one file.
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Auto,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Path of the config file, honoring `MDSWEEP_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("MDSWEEP_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().context("could not determine the user config directory")?;
        Ok(base.join("mdsweep").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Write the config file, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Result of a config migration.
#[derive(Debug)]
pub struct MigrateResult {
    /// Full migrated file content.
    pub content: String,
    /// Dotted keys that were added, like `converter.timeout_secs`.
    pub added_fields: Vec<String>,
    /// Sections that did not exist at all.
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty() || !self.sections_added.is_empty()
    }
}

/// Add missing keys to an existing config file's content.
///
/// User values, comments, and formatting are preserved; only absent keys
/// are appended with their default values. Empty content yields the full
/// default config.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: toml_edit::DocumentMut =
        content.parse().context("config file is not valid TOML")?;

    let defaults_text = toml::to_string_pretty(&Config::default())?;
    let defaults: toml_edit::DocumentMut = defaults_text
        .parse()
        .context("default config is not valid TOML")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        match doc.get_mut(section) {
            None => {
                doc.insert(section, default_item.clone());
                sections_added.push(section.to_string());
                if let Some(table) = default_item.as_table() {
                    for (key, _) in table.iter() {
                        added_fields.push(format!("{}.{}", section, key));
                    }
                }
            }
            Some(existing) => {
                if let (Some(existing_table), Some(default_table)) =
                    (existing.as_table_mut(), default_item.as_table())
                {
                    for (key, value) in default_table.iter() {
                        if !existing_table.contains_key(key) {
                            existing_table.insert(key, value.clone());
                            added_fields.push(format!("{}.{}", section, key));
                        }
                    }
                }
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
