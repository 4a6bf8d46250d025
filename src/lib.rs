//! URL shortener: exact-path redirects with a fallback handler.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{build_handler, build_mapping, yaml_handler, PathMapping, RedirectRecord, RedirectService};
