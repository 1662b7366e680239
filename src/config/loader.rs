//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document without semantic validation.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a TOML file without semantic validation, so callers can
/// apply overrides first.
pub fn read_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Semantic validation wrapped as a [`ConfigError`].
pub fn check_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = read_config(path)?;
    check_config(&config)?;
    Ok(config)
}
