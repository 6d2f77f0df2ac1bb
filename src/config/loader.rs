//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ConsoleConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", list(.0))]
    Validation(Vec<ValidationError>),
}

fn list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ConsoleConfig, ConfigError> {
    let config: ConsoleConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Load the file when given, defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<ConsoleConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(ConsoleConfig::default()),
    }
}
