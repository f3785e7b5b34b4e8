//! Persisted light/dark theme preference.
//!
//! Host-side collaborator: the calculator engine never reads this. The flag
//! is loaded once at startup and written on every toggle, stored as TOML in
//! the user's config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The theme flag. Defaults to light mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePrefs {
    pub dark_mode: bool,
}

impl ThemePrefs {
    /// Default on-disk location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("padcalc")
            .join("theme.toml")
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(?path, "no theme file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let prefs = toml::from_str(&contents)
            .with_context(|| format!("malformed theme file {}", path.display()))?;
        Ok(prefs)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string(self)?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write theme file {}", path.display()))?;
        debug!(?path, dark_mode = self.dark_mode, "theme saved");
        Ok(())
    }

    /// Flip the flag and persist it.
    pub fn toggle(&mut self, path: &Path) -> Result<()> {
        self.dark_mode = !self.dark_mode;
        self.save(path)
    }
}
