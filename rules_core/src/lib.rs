//! rules_core - Source modifier rule files
//!
//! Rule files are TOML documents holding `[[rules]]` entries in the persisted
//! `{key, selector, value, type?, predicate?}` shape. The registry compiles
//! them into selector-keyed [`modifier_core::ModifierPools`] for one actor
//! level at a time.

mod config;
mod registry;
mod rule;

pub use config::{BracketConfig, RuleConfig, RuleFileConfig, ValueConfig};
pub use registry::RuleRegistry;
pub use rule::{Bracket, Rule, RuleEffect, RuleValue};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading rule files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error compiling a single rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Unknown rule key: {0}")]
    UnknownKey(String),
    #[error("Rule '{key}' is missing field '{field}'")]
    MissingField { key: String, field: &'static str },
    #[error("Rule '{0}' has an empty bracket list")]
    EmptyBrackets(String),
}
