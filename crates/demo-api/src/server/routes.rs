//! Static route table shared by the router and the documentation generator.
//!
//! Each [`RouteSpec`] is the single source of truth for one operation: the
//! router mounts its handler, attaches the JSON body parser when it declares a
//! body, and the generator turns its metadata into an OpenAPI operation.

use axum::routing::{on, MethodFilter, MethodRouter};

use super::{handlers, state::AppState};

/// HTTP methods used by the demo routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    pub fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

/// Documentation for a named path parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamDoc {
    pub name: &'static str,
    pub description: &'static str,
}

/// One route: method, axum path pattern, handler, and its documentation.
#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub verb: Verb,
    /// Axum pattern; named parameters are written `:name`.
    pub path: &'static str,
    pub operation_id: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub params: &'static [ParamDoc],
    /// String fields of the JSON request body, if the route takes one.
    pub body_fields: Option<&'static [&'static str]>,
    /// Top-level keys of the 200 response body.
    pub response_fields: &'static [&'static str],
    pub handler: fn(MethodFilter) -> MethodRouter<AppState>,
}

impl RouteSpec {
    pub fn takes_json_body(&self) -> bool {
        self.body_fields.is_some()
    }
}

const ID_TAG: &[&str] = &["ID param"];
const ITEM_FIELDS: &[&str] = &["itemName", "itemDescription"];

const fn id_param(description: &'static str) -> ParamDoc {
    ParamDoc {
        name: "id",
        description,
    }
}

/// Every demo route, in match order.
pub static ROUTES: &[RouteSpec] = &[
    RouteSpec {
        verb: Verb::Get,
        path: "/api/demo",
        operation_id: "getDemo",
        description: "get demo hello world!",
        tags: &[],
        params: &[],
        body_fields: None,
        response_fields: &["message"],
        handler: |m| on(m, handlers::status),
    },
    RouteSpec {
        verb: Verb::Get,
        path: "/api/demo/:id",
        operation_id: "getDemoById",
        description: "get by id",
        tags: ID_TAG,
        params: &[id_param("id to get by")],
        body_fields: None,
        response_fields: &["getID"],
        handler: |m| on(m, handlers::get_by_id),
    },
    RouteSpec {
        verb: Verb::Delete,
        path: "/api/demo/:id",
        operation_id: "deleteDemoById",
        description: "delete by id",
        tags: ID_TAG,
        params: &[id_param("id to delete")],
        body_fields: None,
        response_fields: &["deleteId"],
        handler: |m| on(m, handlers::delete_by_id),
    },
    RouteSpec {
        verb: Verb::Patch,
        path: "/api/demo/:id",
        operation_id: "patchDemoById",
        description: "patch by id with req body",
        tags: ID_TAG,
        params: &[id_param("id to update")],
        body_fields: Some(ITEM_FIELDS),
        response_fields: &["patchId", "newItemName", "newItemDescription"],
        handler: |m| on(m, handlers::patch_by_id),
    },
    RouteSpec {
        verb: Verb::Post,
        path: "/api/demo",
        operation_id: "createDemo",
        description: "post to create a new item",
        tags: &[],
        params: &[],
        body_fields: Some(ITEM_FIELDS),
        response_fields: &["newItemName", "newItemDescription"],
        handler: |m| on(m, handlers::create),
    },
];

/// Names of the parameters in an axum path pattern, in order.
pub fn pattern_params(pattern: &str) -> Vec<&str> {
    pattern
        .split('/')
        .filter_map(|seg| seg.strip_prefix(':').or_else(|| seg.strip_prefix('*')))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_routes_declared() {
        assert_eq!(ROUTES.len(), 5);
    }

    #[test]
    fn method_and_path_pairs_are_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            for b in &ROUTES[i + 1..] {
                assert!(
                    !(a.verb == b.verb && a.path == b.path),
                    "duplicate route {} {}",
                    a.verb.as_str(),
                    a.path
                );
            }
        }
    }

    #[test]
    fn documented_params_appear_in_pattern() {
        for route in ROUTES {
            let names = pattern_params(route.path);
            for p in route.params {
                assert!(names.contains(&p.name), "{} missing :{}", route.path, p.name);
            }
        }
    }

    #[test]
    fn only_post_and_patch_take_a_body() {
        for route in ROUTES {
            let expects_body = matches!(route.verb, Verb::Post | Verb::Patch);
            assert_eq!(route.takes_json_body(), expects_body, "{}", route.operation_id);
        }
    }

    #[test]
    fn pattern_params_extracts_names() {
        assert_eq!(pattern_params("/api/demo/:id"), vec!["id"]);
        assert!(pattern_params("/api/demo").is_empty());
        assert_eq!(pattern_params("/a/:x/b/:y"), vec!["x", "y"]);
    }
}
