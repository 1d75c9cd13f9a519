//! JSON body parser, mounted only on routes that declare a request body.
//!
//! The parsed value is attached to the request as a [`JsonBody`] extension.
//! Requests whose `Content-Type` is not JSON get an empty object, so every
//! body field reads as absent.

use axum::{
    body::{self, Body},
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use common::ApiError;
use serde_json::{Map, Value};

use super::errors::Failure;

/// Largest request body the parser will buffer (100 KiB).
pub const BODY_LIMIT: usize = 100 * 1024;

/// Parsed request body, available to handlers via `Extension<JsonBody>`.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// Middleware: buffer and parse the request body, or raise `MalformedBody`.
pub async fn parse_json_body(req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let bytes = match body::to_bytes(body, BODY_LIMIT).await {
        Ok(b) => b,
        Err(e) => {
            return Failure::from(ApiError::MalformedBody(format!(
                "failed to read request body: {e}"
            )))
            .into_response()
        }
    };

    let parsed = match parse(&parts.headers, &bytes) {
        Ok(v) => v,
        Err(e) => return Failure::from(e).into_response(),
    };

    parts.extensions.insert(JsonBody(parsed));
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Parse `bytes` according to the request headers.
///
/// Only objects and arrays are accepted at the top level.
pub fn parse(headers: &HeaderMap, bytes: &Bytes) -> Result<Value, ApiError> {
    if !is_json(headers) || bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(ApiError::MalformedBody(format!(
            "top-level JSON value must be an object or array, got {other}"
        ))),
    }
}

/// `true` for `application/json` and any `+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(ct) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
