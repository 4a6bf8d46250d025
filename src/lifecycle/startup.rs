//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Validate the result before anything is bound
//! - Load redirect records, build the server, bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Records load before binding (no traffic until mappings exist)
//! - Listener binds last

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_records, read_config, validate_config, ConfigError, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::routing::RecordFormat;

/// Errors that abort startup or end the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub redirect_file: Option<(PathBuf, RecordFormat)>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(address) = &self.bind_address {
            config.listener.bind_address = address.clone();
        }
        if let Some((file, format)) = &self.redirect_file {
            config.redirects.file = Some(file.clone());
            config.redirects.format = Some(*format);
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Read the optional config file, apply overrides, then validate.
pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<ServerConfig, StartupError> {
    let mut config = match config_path {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load redirect records, bind the listener, and serve until shutdown.
pub async fn serve(config: ServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let records = load_records(&config.redirects)?;
    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, records);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn test_load_defaults() {
        let config = load(None, &Overrides::default()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert!(config.redirects.file.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = Overrides {
            bind_address: Some("0.0.0.0:3000".into()),
            redirect_file: Some((PathBuf::from("paths.txt"), RecordFormat::Yaml)),
            log_level: Some("debug".into()),
        };
        let config = load(None, &overrides).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.redirects.file.as_deref(), Some(Path::new("paths.txt")));
        assert_eq!(config.redirects.file_format(), Some(RecordFormat::Yaml));
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            bind_address: Some("nowhere".into()),
            ..Default::default()
        };
        let err = load(None, &overrides).unwrap_err();
        match err {
            StartupError::Config(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::BindAddress("nowhere".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_serve_fails_on_missing_records() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.redirects.file = Some(PathBuf::from("/nonexistent/paths.yaml"));

        let err = serve(config, &Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io { .. })));
    }
}
