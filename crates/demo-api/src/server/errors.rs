//! Terminal error handling.
//!
//! Handlers and middleware never build error bodies themselves. They return a
//! [`Failure`], which becomes a bodiless response carrying the [`ApiError`] as
//! an extension. [`handle_errors`] then renders that error according to the
//! configured [`Environment`]:
//!
//! - production: `{"error": {"message": "server error"}}`, no detail;
//! - otherwise: the error message plus its full structure, and an `error!` log.

use std::{any::Any, sync::Arc};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{DebugErrorResponse, ErrorResponse},
    ApiError,
};
use tracing::{error, warn};

use crate::config::Environment;

/// An [`ApiError`] on its way to the terminal error handler.
#[derive(Debug, Clone)]
pub struct Failure(Arc<ApiError>);

impl Failure {
    pub fn error(&self) -> &ApiError {
        &self.0
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Self(Arc::new(err))
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut resp = status_of(&self.0).into_response();
        resp.extensions_mut().insert(self);
        resp
    }
}

fn status_of(err: &ApiError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware: replace any response carrying a [`Failure`] with its rendered body.
pub async fn handle_errors(State(env): State<Environment>, req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    match resp.extensions_mut().remove::<Failure>() {
        Some(failure) => render(env, failure.error()),
        None => resp,
    }
}

/// Build the JSON error response for `err` in environment `env`.
pub fn render(env: Environment, err: &ApiError) -> Response {
    let status = status_of(err);
    if env.is_production() {
        warn!(kind = err.kind(), status = status.as_u16(), "request failed");
        (status, Json(ErrorResponse::new(err.public_message()))).into_response()
    } else {
        error!(error = %err, detail = ?err, "request failed");
        let body = DebugErrorResponse {
            message: err.to_string(),
            error: err.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Panic hook for `CatchPanicLayer`: a panicking handler is a handler fault.
pub fn panic_to_failure(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "handler panicked".to_owned()
    };
    Failure::from(ApiError::HandlerFault(message)).into_response()
}
