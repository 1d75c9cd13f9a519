//! API documentation generated from the route table.
//!
//! # Lifecycle
//!
//! 1. At startup, [`ApiDocs::generate`] turns [`crate::server::routes::ROUTES`]
//!    into an OpenAPI 3.0 document.
//! 2. The document is rendered once to JSON and YAML and kept as immutable
//!    bytes for the lifetime of the process.
//! 3. `GET /api/docs` and `GET /api/docs/openapi.yaml` serve those bytes;
//!    `GET /api/docs/ui` serves a Swagger UI page that loads the JSON.
//!
//! Generation never fails the process: a rendering error leaves that format
//! as an empty document and is logged.

pub mod builder;
pub mod ui;

pub use builder::build_openapi;

use bytes::Bytes;
use tracing::{info, warn};

use crate::server::routes::RouteSpec;

/// Rendered, immutable API documentation.
#[derive(Debug, Clone)]
pub struct ApiDocs {
    json: Bytes,
    yaml: Bytes,
}

impl ApiDocs {
    /// Build and render the documentation for `routes`.
    pub fn generate(routes: &[RouteSpec]) -> Self {
        let api = build_openapi(routes);

        let json = match serde_json::to_vec_pretty(&api) {
            Ok(v) => Bytes::from(v),
            Err(e) => {
                warn!(error = %e, "failed to render API docs as JSON");
                Bytes::from_static(b"{}")
            }
        };
        let yaml = match serde_yaml::to_string(&api) {
            Ok(s) => Bytes::from(s),
            Err(e) => {
                warn!(error = %e, "failed to render API docs as YAML");
                Bytes::from_static(b"{}\n")
            }
        };

        info!(operations = routes.len(), paths = api.paths.paths.len(), "API docs generated");
        Self { json, yaml }
    }

    /// JSON rendering; cloning is a reference-count bump.
    pub fn json(&self) -> Bytes {
        self.json.clone()
    }

    /// YAML rendering; cloning is a reference-count bump.
    pub fn yaml(&self) -> Bytes {
        self.yaml.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::routes::ROUTES;

    #[test]
    fn json_rendering_lists_paths() {
        let docs = ApiDocs::generate(ROUTES);
        let v: serde_json::Value = serde_json::from_slice(&docs.json()).unwrap();
        assert_eq!(v["openapi"], "3.0.3");
        assert!(v["paths"]["/api/demo"]["post"].is_object());
        assert!(v["paths"]["/api/demo/{id}"]["patch"].is_object());
    }

    #[test]
    fn yaml_rendering_lists_paths() {
        let docs = ApiDocs::generate(ROUTES);
        let text = std::str::from_utf8(&docs.yaml()).unwrap().to_owned();
        assert!(text.contains("/api/demo/{id}"), "{text}");
        assert!(text.contains("Swagger API"));
    }
}
