use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name looked up in the working directory (and under the user config
/// directory as `prodo/config.toml`).
pub const CONFIG_FILE: &str = "prodo.toml";

const DEFAULT_DB_FILE: &str = "tasks.db";

/// Top-level configuration loaded from `prodo.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProdoConfig {
    #[serde(default)]
    storage: StorageConfig,
}

/// Storage configuration block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    database: Option<PathBuf>,
}

impl ProdoConfig {
    /// Load configuration from the first existing candidate path. When none
    /// exist, defaults apply.
    ///
    /// # Errors
    /// Returns an error when an existing file cannot be read or parsed.
    pub fn discover(candidates: &[PathBuf]) -> Result<Self> {
        for candidate in candidates {
            if candidate.exists() {
                return Self::from_file(candidate);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a known file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the database path: the configured location (relative paths
    /// resolved against `base`), or `tasks.db` under `base`.
    #[must_use]
    pub fn database_path(&self, base: &Path) -> PathBuf {
        match &self.storage.database {
            Some(configured) if configured.is_absolute() => configured.clone(),
            Some(configured) => base.join(configured),
            None => base.join(DEFAULT_DB_FILE),
        }
    }
}
