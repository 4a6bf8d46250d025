//! URL shortener server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ axum server ──▶ file records resolver ──match──▶ 302 Found
//!                      (request id,          │ miss
//!                       trace, timeout)      ▼
//!                                     static paths resolver ──match──▶ 302 Found
//!                                            │ miss
//!                                            ▼
//!                                     default router (/, /healthz, 404)
//! ```

use std::path::PathBuf;

use clap::Parser;

use urlshort::config::ObservabilityConfig;
use urlshort::lifecycle::{startup, Overrides, Shutdown};
use urlshort::observability::logging;
use urlshort::routing::RecordFormat;

#[derive(Parser, Debug)]
#[command(name = "urlshort", version)]
#[command(about = "Redirect request paths to configured URLs", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML file with `- path: ... url: ...` entries
    #[arg(long, conflicts_with = "json")]
    yaml: Option<PathBuf>,

    /// JSON file with `[{"path": ..., "url": ...}]` entries
    #[arg(long)]
    json: Option<PathBuf>,

    /// Address to listen on (e.g. 127.0.0.1:8080)
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let redirect_file = match (&self.yaml, &self.json) {
            (Some(path), _) => Some((path.clone(), RecordFormat::Yaml)),
            (None, Some(path)) => Some((path.clone(), RecordFormat::Json)),
            (None, None) => None,
        };
        Overrides {
            bind_address: self.bind.clone(),
            redirect_file,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| ObservabilityConfig::default().log_level);
    let logs = logging::init(&level);

    let config = match startup::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    logs.set_level(&config.observability.log_level);

    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        redirect_file = ?config.redirects.file,
        static_paths = config.redirects.paths.len(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    if let Err(e) = startup::serve(config, &shutdown).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
