//! Redirect resolution and fallback dispatch.
//!
//! # Responsibilities
//! - Look up the request path in the path mapping
//! - Answer matches with `302 Found`
//! - Hand every other request, unmodified, to the fallback service
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact lookup via HashMap on the percent-decoded URI path
//! - No other normalization; the query string is not part of the path
//! - A matched request never reaches the fallback
//! - Resolvers nest: a `RedirectService` is itself a valid fallback

use std::borrow::Cow;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::{self, Either, Ready};
use tower::util::{Oneshot, ServiceExt};
use tower::{Layer, Service};

use crate::http::response::Found;
use crate::routing::mapping::PathMapping;
use crate::routing::records::{decode_json, decode_yaml, DecodeError};

/// Request handler that redirects mapped paths and defers the rest to `fallback`.
#[derive(Debug, Clone)]
pub struct RedirectService<F> {
    mapping: Arc<PathMapping>,
    fallback: F,
}

impl<F> RedirectService<F> {
    pub fn new(mapping: impl Into<Arc<PathMapping>>, fallback: F) -> Self {
        Self {
            mapping: mapping.into(),
            fallback,
        }
    }

    pub fn mapping(&self) -> &PathMapping {
        &self.mapping
    }
}

impl<F, B> Service<Request<B>> for RedirectService<F>
where
    F: Service<Request<B>, Response = Response> + Clone,
{
    type Response = Response;
    type Error = F::Error;
    type Future = Either<Ready<Result<Response, F::Error>>, Oneshot<F, Request<B>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // The fallback is driven to readiness per request by `oneshot`.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let destination = {
            let path = decode_path(req.uri().path());
            self.mapping.lookup(&path)
        };
        match destination {
            Some(destination) => {
                tracing::debug!(
                    path = %req.uri().path(),
                    destination = %destination,
                    "Redirecting"
                );
                Either::Left(future::ready(Ok(Found::new(destination).into_response())))
            }
            None => {
                tracing::debug!(path = %req.uri().path(), "No redirect, using fallback");
                Either::Right(self.fallback.clone().oneshot(req))
            }
        }
    }
}

/// Percent-decode a request path. Paths that do not decode to UTF-8 are used as sent.
fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// Layer form of [`RedirectService`]: the wrapped service becomes the fallback.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    mapping: Arc<PathMapping>,
}

impl RedirectLayer {
    pub fn new(mapping: impl Into<Arc<PathMapping>>) -> Self {
        Self {
            mapping: mapping.into(),
        }
    }
}

impl<F> Layer<F> for RedirectLayer {
    type Service = RedirectService<F>;

    fn layer(&self, fallback: F) -> Self::Service {
        RedirectService {
            mapping: self.mapping.clone(),
            fallback,
        }
    }
}

/// Build a handler that redirects paths in `mapping` and otherwise calls `fallback`.
pub fn build_handler<F>(mapping: impl Into<Arc<PathMapping>>, fallback: F) -> RedirectService<F> {
    RedirectService::new(mapping, fallback)
}

/// Decode a YAML redirect document and build its handler.
///
/// The document is a sequence of entries:
///
/// ```yaml
/// - path: /some-path
///   url: https://www.some-url.com/demo
/// ```
///
/// The only failure is a malformed document; no handler is produced then.
pub fn yaml_handler<F>(yml: &[u8], fallback: F) -> Result<RedirectService<F>, DecodeError> {
    let records = decode_yaml(yml)?;
    Ok(build_handler(PathMapping::from_records(records), fallback))
}

/// Decode a JSON redirect document (`[{"path": .., "url": ..}]`) and build its handler.
pub fn json_handler<F>(json: &[u8], fallback: F) -> Result<RedirectService<F>, DecodeError> {
    let records = decode_json(json)?;
    Ok(build_handler(PathMapping::from_records(records), fallback))
}
