//! Engine configuration loading
//!
//! Configuration is an explicit value handed to every call that needs it.
//! Nothing here is stored in global state.

mod engine;

pub use engine::{CriticalDoubling, DamageConfig, EngineConfig, ProficiencyConfig};

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Read and deserialize a TOML file
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
        error,
        path: path.to_path_buf(),
    })?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
