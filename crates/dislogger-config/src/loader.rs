//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::template::default_config;

/// Suffix appended to a config file that failed to parse.
pub const CORRUPTED_SUFFIX: &str = "_corrupted";

/// Configuration loader with create-on-missing and quarantine-on-corruption.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Make sure a usable config exists at `path` and load it.
    ///
    /// A missing file is replaced by the default template. A file that is not
    /// a JSON object is renamed to `<path>_corrupted`, untouched, and
    /// [`ConfigError::Corrupted`] is returned.
    pub fn initiate(path: &Path) -> Result<ConfigDocument, ConfigError> {
        if !path.is_file() {
            Self::create_default(path)?;
        }

        let bytes = fs::read(path)?;
        match Self::parse(&bytes) {
            Ok(document) => {
                info!("Loaded config file {}", path.display());
                Ok(document)
            }
            Err(reason) => {
                let quarantined = Self::quarantine(path)?;
                warn!(
                    "Config file {} is corrupted, moved to {}",
                    path.display(),
                    quarantined.display()
                );
                Err(ConfigError::Corrupted {
                    path: path.to_path_buf(),
                    quarantined,
                    reason,
                })
            }
        }
    }

    /// Load an existing config file without any repair.
    pub fn load(path: &Path) -> Result<ConfigDocument, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load a config from a string.
    pub fn load_str(content: &str) -> Result<ConfigDocument, ConfigError> {
        ConfigDocument::from_json(content)
    }

    /// Write the default template to `path`, creating parent directories.
    pub fn create_default(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&default_config())?;
        fs::write(path, content)?;
        info!("Created default config file {}", path.display());
        Ok(())
    }

    /// Where a corrupted `path` is moved to.
    pub fn quarantine_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(CORRUPTED_SUFFIX);
        PathBuf::from(name)
    }

    fn quarantine(path: &Path) -> Result<PathBuf, ConfigError> {
        let target = Self::quarantine_path(path);
        fs::rename(path, &target).map_err(|source| ConfigError::Quarantine {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(target)
    }

    fn parse(bytes: &[u8]) -> Result<ConfigDocument, String> {
        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        ConfigDocument::from_value(value).map_err(|e| e.to_string())
    }
}
