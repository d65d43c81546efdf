//! Loading `RuntimeConfig` from TOML.
//!
//! Every field is optional, so an empty document is valid and yields the
//! compiled defaults. Unknown keys are rejected to surface typos early.

pub mod error;

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::constants::CONFIG_PATH_ENV;
use crate::runtime::RuntimeConfig;
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;

/// Result of a successful load: the validated config, any non-fatal
/// warnings, and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: RuntimeConfig,
    pub warnings: ConfigWarnings,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a TOML document.
    pub fn load_str(
        &self,
        contents: &str,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let config: RuntimeConfig = toml::from_str(contents)
            .map_err(|source| ConfigLoadError::Parse { source })?;
        let warnings = apply_guard_rails(&config)?;
        for warning in &warnings.items {
            warn!("reels config: {}", warning.message);
        }
        Ok(ConfigLoad {
            config,
            warnings,
            source: None,
        })
    }

    /// Read, parse and validate a TOML file.
    pub fn load_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut load = self.load_str(&contents)?;
        debug!("loaded reels config from {}", path.display());
        load.source = Some(path.to_path_buf());
        Ok(load)
    }

    /// Load from the file named by `REELS_CONFIG`, or fall back to defaults
    /// when the variable is unset or empty.
    pub fn load_from_env(&self) -> Result<ConfigLoad, ConfigLoadError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => {
                self.load_path(PathBuf::from(path))
            }
            _ => Ok(ConfigLoad {
                config: RuntimeConfig::default(),
                warnings: ConfigWarnings::default(),
                source: None,
            }),
        }
    }
}
