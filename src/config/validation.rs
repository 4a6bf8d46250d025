//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check static redirects can be served as `Location` headers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Redirect documents are checked after decoding, see `validate_records`

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::http::response::is_valid_location;
use crate::routing::RedirectRecord;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("redirect path must not be empty")]
    EmptyPath,

    #[error("redirect for {path:?} has a destination that is not a valid Location header")]
    InvalidDestination { path: String },

    #[error("cannot infer the format of redirect file {0:?}; set redirects.format")]
    UnknownFileFormat(PathBuf),

    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if let Some(file) = &config.redirects.file {
        if config.redirects.file_format().is_none() {
            errors.push(ValidationError::UnknownFileFormat(file.clone()));
        }
    }

    check_redirects(
        config.redirects.paths.iter().map(|(p, d)| (p.as_str(), d.as_str())),
        &mut errors,
    );

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate decoded redirect records with the same rules as static paths.
pub fn validate_records(records: &[RedirectRecord]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_redirects(
        records.iter().map(|r| (r.path.as_str(), r.destination.as_str())),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_redirects<'a>(
    redirects: impl Iterator<Item = (&'a str, &'a str)>,
    errors: &mut Vec<ValidationError>,
) {
    for (path, destination) in redirects {
        if path.is_empty() {
            errors.push(ValidationError::EmptyPath);
        }
        if !is_valid_location(destination) {
            errors.push(ValidationError::InvalidDestination {
                path: path.to_string(),
            });
        }
    }
}
