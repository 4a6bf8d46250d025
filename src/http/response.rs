//! Response construction.
//!
//! # Responsibilities
//! - Build the `302 Found` redirect response
//! - Build the default responses served when no redirect matches
//!
//! # Design Decisions
//! - Redirects carry an empty body; clients follow `Location`
//! - A destination that cannot be a header value yields 500, never a panic

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// A `302 Found` redirect to `location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub location: String,
}

impl Found {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.location) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(e) => {
                tracing::error!(
                    destination = %self.location.escape_debug(),
                    error = %e,
                    "Redirect destination is not a valid Location header"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Whether `destination` can be sent as a `Location` header value.
pub fn is_valid_location(destination: &str) -> bool {
    HeaderValue::from_str(destination).is_ok()
}

/// Default response for unmatched paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_found_response() {
        let resp = Found::new("https://golang.org").into_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "https://golang.org");

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_found_relative_location() {
        let resp = Found::new("/docs").into_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/docs");
    }

    #[test]
    fn test_found_invalid_location() {
        let resp = Found::new("https://example.com/\r\nSet-Cookie: x=1").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_is_valid_location() {
        assert!(is_valid_location("https://example.com/a?b=c"));
        assert!(!is_valid_location("https://example.com/\n"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let resp = not_found().await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"not found");
    }
}
