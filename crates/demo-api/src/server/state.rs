//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Environment;
use crate::docs::ApiDocs;

/// Application state shared across all request handlers.
///
/// Everything here is immutable after startup; cloning only bumps `Arc`
/// counts.
#[derive(Clone)]
pub struct AppState {
    /// Active environment, consulted by the access logger and error handler.
    pub env: Environment,
    /// Pre-rendered API documentation.
    pub docs: Arc<ApiDocs>,
}

impl AppState {
    /// Create a new [`AppState`] with the provided environment and docs.
    pub fn new(env: Environment, docs: ApiDocs) -> Self {
        Self {
            env,
            docs: Arc::new(docs),
        }
    }
}

impl Default for AppState {
    /// Development state with docs generated from the route table, suitable for tests.
    fn default() -> Self {
        Self::new(
            Environment::Development,
            ApiDocs::generate(super::routes::ROUTES),
        )
    }
}
