//! Cross-cutting layers applied to every request.
//!
//! Includes the access logger, fixed security response headers, and the
//! cross-origin policy.

use std::{net::SocketAddr, time::Duration};

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderName, HeaderValue, Method, Version},
    middleware::Next,
    response::Response,
    Router,
};
use tokio::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::info;

use crate::config::Environment;

// ---------------------------------------------------------------------------
// Access log
// ---------------------------------------------------------------------------

/// Access-log line format, chosen from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLogFormat {
    /// `METHOD URL STATUS LENGTH - MS ms`
    Tiny,
    /// Apache common log format.
    Common,
}

impl From<Environment> for AccessLogFormat {
    fn from(env: Environment) -> Self {
        if env.is_production() {
            AccessLogFormat::Tiny
        } else {
            AccessLogFormat::Common
        }
    }
}

/// Everything one access-log line needs, captured around a request.
#[derive(Debug, Clone)]
pub struct AccessEntry {
    pub remote_addr: Option<SocketAddr>,
    pub method: Method,
    pub url: String,
    pub version: Version,
    pub status: u16,
    pub content_length: Option<u64>,
    pub latency: Duration,
    pub time: chrono::DateTime<chrono::Utc>,
}

impl AccessEntry {
    pub fn format(&self, format: AccessLogFormat) -> String {
        let length = self
            .content_length
            .map_or_else(|| "-".to_owned(), |n| n.to_string());
        match format {
            AccessLogFormat::Tiny => format!(
                "{} {} {} {} - {:.3} ms",
                self.method,
                self.url,
                self.status,
                length,
                self.latency.as_secs_f64() * 1000.0
            ),
            AccessLogFormat::Common => format!(
                "{} - - [{}] \"{} {} {:?}\" {} {}",
                self.remote_addr
                    .map_or_else(|| "-".to_owned(), |a| a.ip().to_string()),
                self.time.format("%d/%b/%Y:%H:%M:%S +0000"),
                self.method,
                self.url,
                self.version,
                self.status,
                length
            ),
        }
    }
}

/// Middleware: write one access-log line per request to the `access` target.
///
/// Observes the request and response only; neither is modified.
pub async fn access_log(
    State(format): State<AccessLogFormat>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let time = chrono::Utc::now();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let method = req.method().clone();
    let url = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned());
    let version = req.version();

    let resp = next.run(req).await;

    let entry = AccessEntry {
        remote_addr,
        method,
        url,
        version,
        status: resp.status().as_u16(),
        content_length: content_length(&resp),
        latency: start.elapsed(),
        time,
    };
    info!(
        target: "access",
        method = %entry.method,
        path = %entry.url,
        status = entry.status,
        latency_ms = latency_millis(entry.latency),
        "{}",
        entry.format(format)
    );
    resp
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn latency_millis(latency: Duration) -> u64 {
    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)
}

fn content_length(resp: &Response) -> Option<u64> {
    resp.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| resp.body().size_hint().exact())
}

// ---------------------------------------------------------------------------
// Security headers
// ---------------------------------------------------------------------------

/// Defensive headers set on every response that does not already carry them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("x-xss-protection", "0"),
];

/// Wrap `router` with one `SetResponseHeaderLayer` per security header.
pub fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

/// Permissive cross-origin policy: any origin, method, and header.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
