//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber before anything else runs
//! - Pick the log level from `RUST_LOG`, else from configuration
//! - Apply the configured level once configuration has loaded
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` always wins over the configured level
//! - The filter sits behind a reload layer so startup errors are logged too

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("urlshort={level},tower_http={level}")
}

/// Handle for changing the log level after [`init`].
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to `level` unless `RUST_LOG` chose the filter.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(EnvFilter::new(default_directive(level))) {
            tracing::warn!(error = %e, level = %level, "Failed to apply log level");
        }
    }
}

/// Install the global subscriber. Later calls leave the first one in place.
pub fn init(level: &str) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directive(level)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    LogHandle {
        filter: handle,
        from_env,
    }
}
