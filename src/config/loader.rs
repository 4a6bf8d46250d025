//! Configuration and redirect document loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{RedirectsConfig, ServerConfig};
use crate::config::validation::{validate_config, validate_records, ValidationError};
use crate::routing::{decode_records, DecodeError, RedirectRecord};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Redirect file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let config = read_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read and parse a TOML file without semantic validation.
///
/// Used when overrides are applied before validating.
pub fn read_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read and decode the configured redirect document.
///
/// Returns no records when no file is configured. Once the document
/// decodes, every record is kept.
pub fn load_records(redirects: &RedirectsConfig) -> Result<Vec<RedirectRecord>, ConfigError> {
    let Some(path) = redirects.file.as_deref() else {
        return Ok(Vec::new());
    };

    let format = redirects.file_format().ok_or_else(|| {
        ConfigError::Validation(vec![ValidationError::UnknownFileFormat(path.to_path_buf())])
    })?;

    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = decode_records(format, &bytes).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // Decoded records are served as written; problems only get reported.
    if let Err(problems) = validate_records(&records) {
        for problem in problems {
            tracing::warn!(
                path = %path.display(),
                problem = %problem,
                "Redirect record will not work as written"
            );
        }
    }

    tracing::info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        "Redirect records loaded"
    );
    Ok(records)
}
