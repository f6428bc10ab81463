//! Per-user configuration directory for resync tooling
//!
//! Configuration lives in `~/.config/resync/` by default. A [`ConfigDir`]
//! can also be rooted anywhere else, which is how tests and embedding hosts
//! keep their files apart from the user's real configuration.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "resync";

/// A directory holding JSON configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// The default per-user directory (`~/.config/resync/` on Linux)
    pub fn user() -> Option<Self> {
        dirs::config_dir().map(|p| Self::at(p.join(APP_DIR)))
    }

    /// A config directory rooted at an explicit path
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside this directory
    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path(filename).exists()
    }

    /// Create the directory (and parents) if missing
    pub fn ensure(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("Failed to create config directory: {}", self.root.display())
        })?;
        Ok(&self.root)
    }

    /// Load and parse a JSON file from this directory
    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        load_json_file(&self.path(filename))
    }

    /// Load a JSON file, or `None` when it does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_json_opt<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        if !self.exists(filename) {
            return Ok(None);
        }
        self.load_json(filename).map(Some)
    }

    /// Write a value as pretty JSON, creating the directory first
    pub fn save_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        self.ensure()?;
        let path = self.path(filename);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Create the per-user config directory. Call once at host startup.
pub fn init() -> Result<PathBuf> {
    let dir = ConfigDir::user().context("Could not determine config directory")?;
    dir.ensure()?;
    Ok(dir.root)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
