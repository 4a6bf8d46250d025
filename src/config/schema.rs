//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::RecordFormat;

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Redirect sources.
    pub redirects: RedirectsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Where redirects come from.
///
/// Records from `file` take precedence over `paths`; unmatched requests
/// fall through to the static `paths`, then to the default handler.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Redirect document with a sequence of `{path, url}` entries.
    pub file: Option<PathBuf>,

    /// Document format. Inferred from the file extension when absent.
    pub format: Option<RecordFormat>,

    /// Static path to URL mapping.
    pub paths: BTreeMap<String, String>,
}

impl RedirectsConfig {
    /// Format of the configured file, explicit or inferred.
    pub fn file_format(&self) -> Option<RecordFormat> {
        self.format
            .or_else(|| self.file.as_deref().and_then(RecordFormat::from_path))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.redirects.file.is_none());
        assert!(config.redirects.paths.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"

            [timeouts]
            request_secs = 5

            [redirects]
            file = "redirects.txt"
            format = "json"

            [redirects.paths]
            "/urlshort-godoc" = "https://godoc.org/github.com/gophercises/urlshort"
            "/yaml-godoc" = "https://godoc.org/gopkg.in/yaml.v2"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.timeouts.request_secs, 5);
        assert_eq!(config.redirects.file_format(), Some(RecordFormat::Json));
        assert_eq!(config.redirects.paths.len(), 2);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_file_format_inferred() {
        let redirects = RedirectsConfig {
            file: Some(PathBuf::from("paths.yml")),
            ..Default::default()
        };
        assert_eq!(redirects.file_format(), Some(RecordFormat::Yaml));

        let redirects = RedirectsConfig {
            file: Some(PathBuf::from("paths.conf")),
            ..Default::default()
        };
        assert_eq!(redirects.file_format(), None);
    }
}
