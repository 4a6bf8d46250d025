//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! redirect document (YAML/JSON)
//!     → loader.rs (read file, decode records)
//!     → validation.rs (problems logged as warnings, records kept)
//!     → Vec<RedirectRecord> handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_records, parse_config, read_config, ConfigError};
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RedirectsConfig;
pub use schema::ServerConfig;
pub use schema::TimeoutConfig;
pub use validation::{validate_config, ValidationError};
