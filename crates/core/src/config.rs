//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = r#"# elimtui configuration
#
# data_root: directory holding the autosaved state and exported backups.
# Defaults to <config dir>/elimtui.
#
# autosave: persist the campaign state after every change.
# autosave = true
"#;

/// User-tunable settings, loaded from `config.toml` with `ELIMTUI_*`
/// environment overrides layered on top.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the autosaved state file and the backup folder.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    /// Whether to persist state after every mutation.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            autosave: default_autosave(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from an explicit file, which may be absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("ELIMTUI"))
            .build()
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        let loaded = settings
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        Ok(loaded)
    }

    /// Path of the autosaved state snapshot.
    pub fn state_path(&self) -> PathBuf {
        self.data_root.join("state.json")
    }

    /// Directory exported backups are written into.
    pub fn backup_root(&self) -> PathBuf {
        self.data_root.join("backups")
    }
}

/// Location of the user config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("elimtui/config.toml")
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = config_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn default_data_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("elimtui")
}

fn default_autosave() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("nope.toml"))?;
        assert!(config.autosave);
        assert_eq!(config.data_root, default_data_root());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_root = \"/tmp/elim\"\nautosave = false\n")?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.data_root, PathBuf::from("/tmp/elim"));
        assert!(!config.autosave);
        assert_eq!(config.state_path(), PathBuf::from("/tmp/elim/state.json"));
        assert_eq!(config.backup_root(), PathBuf::from("/tmp/elim/backups"));
        Ok(())
    }
}
