//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the redirect chain (file records → static paths → default router)
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::not_found;
use crate::routing::{build_handler, PathMapping, RedirectRecord, RedirectService};

/// Resolver chain served by [`HttpServer`].
pub type RedirectChain = RedirectService<RedirectService<Router>>;

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server from configuration and decoded redirect records.
    ///
    /// Records shadow the static `redirects.paths` entries with the same path.
    pub fn new(config: ServerConfig, records: Vec<RedirectRecord>) -> Self {
        let chain = Self::build_chain(&config, records);
        let router = Self::build_router(&config, chain);
        Self { router, config }
    }

    fn build_chain(config: &ServerConfig, records: Vec<RedirectRecord>) -> RedirectChain {
        let static_paths: PathMapping = config
            .redirects
            .paths
            .iter()
            .map(|(path, destination)| (path.as_str(), destination.as_str()))
            .collect();
        let file_paths = PathMapping::from_records(records);

        tracing::info!(
            static_paths = static_paths.len(),
            file_paths = file_paths.len(),
            "Redirect mappings built"
        );

        build_handler(file_paths, build_handler(static_paths, default_router()))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, chain: RedirectChain) -> Router {
        Router::new()
            .fallback_service(chain)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = req.request_id().unwrap_or("-"),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled application router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Handler for requests that match no redirect.
pub fn default_router() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/healthz", get(health))
        .fallback(not_found)
}

async fn hello() -> &'static str {
    "Hello, world!"
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::http::request::X_REQUEST_ID;

    fn server() -> HttpServer {
        let mut config = ServerConfig::default();
        config
            .redirects
            .paths
            .insert("/urlshort-godoc".into(), "https://godoc.org/github.com/gophercises/urlshort".into());
        config
            .redirects
            .paths
            .insert("/shared".into(), "https://static.example".into());

        let records = vec![
            RedirectRecord::new("/urlshort", "https://github.com/gophercises/urlshort"),
            RedirectRecord::new("/shared", "https://file.example"),
        ];
        HttpServer::new(config, records)
    }

    async fn send(uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        server().router().oneshot(req).await.unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_redirect() {
        let resp = send("/urlshort").await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "https://github.com/gophercises/urlshort");
    }

    #[tokio::test]
    async fn test_static_redirect() {
        let resp = send("/urlshort-godoc").await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "https://godoc.org/github.com/gophercises/urlshort"
        );
    }

    #[tokio::test]
    async fn test_file_records_shadow_static_paths() {
        let resp = send("/shared").await;
        assert_eq!(resp.headers()[header::LOCATION], "https://file.example");
    }

    #[tokio::test]
    async fn test_default_routes() {
        let resp = send("/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "Hello, world!");

        let resp = send("/healthz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");

        let resp = send("/nowhere").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "not found");
    }

    #[tokio::test]
    async fn test_request_id_on_response() {
        let resp = send("/urlshort").await;
        let id = resp.headers()[X_REQUEST_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let req = Request::builder()
            .uri("/nowhere")
            .header(X_REQUEST_ID, "client-id-1")
            .body(Body::empty())
            .unwrap();
        let resp = server().router().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[X_REQUEST_ID], "client-id-1");
    }

    #[test]
    fn test_config_accessor() {
        assert_eq!(server().config().redirects.paths.len(), 2);
    }
}
