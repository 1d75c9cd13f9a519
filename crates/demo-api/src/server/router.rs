//! Axum router construction.
//!
//! Middleware order, outermost first: access log, security headers, CORS,
//! error handler, panic catcher. The JSON body parser is attached per route,
//! only where the route table declares a body.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use super::{
    body, errors, handlers,
    middleware::{self, AccessLogFormat},
    routes::{RouteSpec, ROUTES},
    state::AppState,
};
use crate::config::Environment;

/// Path of the JSON API documentation.
pub const DOCS_PATH: &str = "/api/docs";
/// Path of the YAML API documentation.
pub const DOCS_YAML_PATH: &str = "/api/docs/openapi.yaml";
/// Path of the Swagger UI page.
pub const DOCS_UI_PATH: &str = "/api/docs/ui";

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    let env = state.env;

    let router = mount(ROUTES)
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        })
        .route(DOCS_PATH, get(handlers::docs_json))
        .route(DOCS_YAML_PATH, get(handlers::docs_yaml))
        .route(DOCS_UI_PATH, get(handlers::docs_ui))
        .fallback(handlers::not_found)
        .with_state(state);

    with_middleware(router, env)
}

/// Wrap `router` in the fixed middleware chain.
fn with_middleware(router: Router, env: Environment) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(errors::panic_to_failure))
        .layer(from_fn_with_state(env, errors::handle_errors))
        .layer(middleware::cors());

    middleware::with_security_headers(router).layer(from_fn_with_state(
        AccessLogFormat::from(env),
        middleware::access_log,
    ))
}

/// Group `routes` by path into one [`MethodRouter`] each, preserving order.
///
/// Methods a path does not declare fall through to the not-found handler
/// instead of axum's default 405.
fn mount(routes: &[RouteSpec]) -> Vec<(&'static str, MethodRouter<AppState>)> {
    let mut paths: Vec<&'static str> = Vec::new();
    for route in routes {
        if !paths.contains(&route.path) {
            paths.push(route.path);
        }
    }

    paths
        .into_iter()
        .map(|path| {
            let method_router = routes
                .iter()
                .filter(|r| r.path == path)
                .fold(MethodRouter::new(), |acc, r| acc.merge(mount_one(r)));
            (path, method_router.fallback(handlers::not_found))
        })
        .collect()
}

fn mount_one(route: &RouteSpec) -> MethodRouter<AppState> {
    let method_router = (route.handler)(route.verb.filter());
    if route.takes_json_body() {
        method_router.layer(from_fn(body::parse_json_body))
    } else {
        method_router
    }
}
