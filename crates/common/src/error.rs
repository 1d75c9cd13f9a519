//! Error taxonomy for everything raised while serving a request.

use serde::Serialize;
use thiserror::Error;

/// Any failure raised by a middleware stage or a handler.
///
/// Nothing recovers locally: every variant travels to the terminal error
/// handler, which picks the response body. Variants map to HTTP status codes:
/// - [`ApiError::MalformedBody`] → 500
/// - [`ApiError::HandlerFault`] → 500
/// - [`ApiError::RouteNotFound`] → 404
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request declared a JSON body that could not be parsed.
    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    /// A handler failed or panicked.
    #[error("handler fault: {0}")]
    HandlerFault(String),

    /// No route matches the request method and path.
    #[error("cannot {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl ApiError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::MalformedBody(_) => 500,
            ApiError::HandlerFault(_) => 500,
            ApiError::RouteNotFound { .. } => 404,
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::HandlerFault(_) => "handler_fault",
            ApiError::RouteNotFound { .. } => "route_not_found",
        }
    }

    /// Message safe to show in production, where no internal detail may leak.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::RouteNotFound { .. } => "not found",
            _ => "server error",
        }
    }

    /// Full structured view of the error, used for development responses.
    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            kind: self.kind(),
            status: self.http_status(),
            message: self.to_string(),
        }
    }
}

/// Serialisable breakdown of an [`ApiError`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ApiError::MalformedBody("x".into()).http_status(), 500);
        assert_eq!(ApiError::HandlerFault("x".into()).http_status(), 500);
        let not_found = ApiError::RouteNotFound {
            method: "GET".into(),
            path: "/nope".into(),
        };
        assert_eq!(not_found.http_status(), 404);
    }

    #[test]
    fn display_includes_method_and_path() {
        let e = ApiError::RouteNotFound {
            method: "PUT".into(),
            path: "/api/demo".into(),
        };
        assert_eq!(e.to_string(), "cannot PUT /api/demo");
    }

    #[test]
    fn public_message_hides_detail() {
        let e = ApiError::MalformedBody("expected value at line 1 column 2".into());
        assert_eq!(e.public_message(), "server error");
        assert!(!e.public_message().contains("line 1"));
    }

    #[test]
    fn detail_carries_kind_and_status() {
        let d = ApiError::HandlerFault("boom".into()).detail();
        assert_eq!(d.kind, "handler_fault");
        assert_eq!(d.status, 500);
        assert!(d.message.contains("boom"));
    }
}
