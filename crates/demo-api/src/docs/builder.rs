//! Assembles an [`openapiv3::OpenAPI`] document from the static route table.

use std::collections::BTreeSet;

use openapiv3::{
    Info, MediaType, ObjectType, OpenAPI, Operation, Parameter, ParameterData,
    ParameterSchemaOrContent, PathItem, PathStyle, ReferenceOr, RequestBody, Response,
    Responses, Schema, SchemaData, SchemaKind, StatusCode, StringType, Tag, Type,
};
use tracing::warn;

use crate::server::routes::{pattern_params, RouteSpec, Verb};

pub const TITLE: &str = "Swagger API";
pub const VERSION: &str = "1.0.0";
pub const DESCRIPTION: &str = "Usando o Swagger";

const JSON: &str = "application/json";

/// Build the OpenAPI document describing `routes`.
///
/// Metadata that does not fit the route's pattern is skipped with a warning
/// rather than failing.
pub fn build_openapi(routes: &[RouteSpec]) -> OpenAPI {
    let mut api = OpenAPI {
        openapi: "3.0.3".into(),
        info: Info {
            title: TITLE.into(),
            description: Some(DESCRIPTION.into()),
            version: VERSION.into(),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut tags = BTreeSet::new();

    for route in routes {
        tags.extend(route.tags.iter().copied());

        let entry = api
            .paths
            .paths
            .entry(openapi_path(route.path))
            .or_insert_with(|| ReferenceOr::Item(PathItem::default()));

        let ReferenceOr::Item(item) = entry else {
            continue;
        };

        let slot = operation_slot(item, route.verb);
        if slot.is_some() {
            warn!(
                method = route.verb.as_str(),
                path = route.path,
                "duplicate route in documentation; keeping the first"
            );
            continue;
        }
        *slot = Some(build_operation(route));
    }

    api.tags = tags
        .into_iter()
        .map(|name| Tag {
            name: name.to_owned(),
            description: None,
            external_docs: None,
            extensions: Default::default(),
        })
        .collect();

    api
}

/// Convert an axum pattern (`/items/:id`) to OpenAPI syntax (`/items/{id}`).
pub fn openapi_path(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|seg| match seg.strip_prefix(':').or_else(|| seg.strip_prefix('*')) {
            Some(name) => format!("{{{name}}}"),
            None => seg.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn operation_slot(item: &mut PathItem, verb: Verb) -> &mut Option<Operation> {
    match verb {
        Verb::Get => &mut item.get,
        Verb::Post => &mut item.post,
        Verb::Patch => &mut item.patch,
        Verb::Delete => &mut item.delete,
    }
}

fn build_operation(route: &RouteSpec) -> Operation {
    let in_pattern = pattern_params(route.path);

    let parameters = route
        .params
        .iter()
        .filter(|p| {
            let present = in_pattern.contains(&p.name);
            if !present {
                warn!(path = route.path, param = p.name, "documented parameter not in path; skipped");
            }
            present
        })
        .map(|p| {
            ReferenceOr::Item(Parameter::Path {
                parameter_data: ParameterData {
                    name: p.name.to_owned(),
                    description: Some(p.description.to_owned()),
                    required: true,
                    deprecated: None,
                    format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(string_schema())),
                    example: None,
                    examples: Default::default(),
                    explode: None,
                    extensions: Default::default(),
                },
                style: PathStyle::Simple,
            })
        })
        .collect();

    let request_body = route.body_fields.map(|fields| {
        let mut body = RequestBody {
            description: Some("request body".into()),
            required: false,
            ..Default::default()
        };
        body.content.insert(JSON.into(), json_media(object_schema(fields, true)));
        ReferenceOr::Item(body)
    });

    let mut ok = Response {
        description: "A successful response".into(),
        ..Default::default()
    };
    ok.content
        .insert(JSON.into(), json_media(object_schema(route.response_fields, false)));

    let mut responses = Responses::default();
    responses
        .responses
        .insert(StatusCode::Code(200), ReferenceOr::Item(ok));
    responses.responses.insert(
        StatusCode::Code(500),
        ReferenceOr::Item(Response {
            description: "Unhandled error".into(),
            ..Default::default()
        }),
    );

    Operation {
        tags: route.tags.iter().map(|t| (*t).to_owned()).collect(),
        description: Some(route.description.to_owned()),
        operation_id: Some(route.operation_id.to_owned()),
        parameters,
        request_body,
        responses,
        ..Default::default()
    }
}

fn string_schema() -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(Type::String(StringType::default())),
    }
}

/// Object schema whose properties are all strings.
fn object_schema(fields: &[&str], all_required: bool) -> Schema {
    let mut obj = ObjectType::default();
    for field in fields {
        obj.properties
            .insert((*field).to_owned(), ReferenceOr::boxed_item(string_schema()));
    }
    if all_required {
        obj.required = fields.iter().map(|f| (*f).to_owned()).collect();
    }
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(Type::Object(obj)),
    }
}

fn json_media(schema: Schema) -> MediaType {
    MediaType {
        schema: Some(ReferenceOr::Item(schema)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::routes::{ParamDoc, ROUTES};
    use axum::routing::{on, MethodRouter};

    fn item<'a>(api: &'a OpenAPI, path: &str) -> &'a PathItem {
        match api.paths.paths.get(path) {
            Some(ReferenceOr::Item(item)) => item,
            other => panic!("missing path item {path}: {other:?}"),
        }
    }

    #[test]
    fn openapi_path_converts_params() {
        assert_eq!(openapi_path("/api/demo/:id"), "/api/demo/{id}");
        assert_eq!(openapi_path("/api/demo"), "/api/demo");
    }

    #[test]
    fn all_five_operations_documented() {
        let api = build_openapi(ROUTES);
        assert_eq!(api.paths.paths.len(), 2);

        let list = item(&api, "/api/demo");
        assert!(list.get.is_some());
        assert!(list.post.is_some());

        let by_id = item(&api, "/api/demo/{id}");
        assert!(by_id.get.is_some());
        assert!(by_id.delete.is_some());
        assert!(by_id.patch.is_some());
    }

    #[test]
    fn id_routes_declare_path_parameter() {
        let api = build_openapi(ROUTES);
        let by_id = item(&api, "/api/demo/{id}");
        for op in [&by_id.get, &by_id.delete, &by_id.patch] {
            let op = op.as_ref().unwrap();
            assert_eq!(op.parameters.len(), 1);
            match &op.parameters[0] {
                ReferenceOr::Item(Parameter::Path { parameter_data, .. }) => {
                    assert_eq!(parameter_data.name, "id");
                    assert!(parameter_data.required);
                }
                other => panic!("unexpected parameter {other:?}"),
            }
            assert_eq!(op.tags, vec!["ID param".to_owned()]);
        }
    }

    #[test]
    fn body_routes_declare_request_body() {
        let api = build_openapi(ROUTES);
        let post = item(&api, "/api/demo").post.as_ref().unwrap();
        let Some(ReferenceOr::Item(body)) = &post.request_body else {
            panic!("POST has no request body");
        };
        assert!(body.content.contains_key(JSON));
        assert!(item(&api, "/api/demo").get.as_ref().unwrap().request_body.is_none());
    }

    #[test]
    fn info_and_tags() {
        let api = build_openapi(ROUTES);
        assert_eq!(api.info.title, TITLE);
        assert_eq!(api.info.version, VERSION);
        assert_eq!(api.tags.len(), 1);
        assert_eq!(api.tags[0].name, "ID param");
    }

    fn unused(m: axum::routing::MethodFilter) -> MethodRouter<crate::server::state::AppState> {
        on(m, || async {})
    }

    #[test]
    fn stray_parameter_is_skipped_not_fatal() {
        let routes = [RouteSpec {
            verb: Verb::Get,
            path: "/things",
            operation_id: "things",
            description: "no params here",
            tags: &[],
            params: &[ParamDoc {
                name: "id",
                description: "not in the pattern",
            }],
            body_fields: None,
            response_fields: &[],
            handler: unused,
        }];
        let api = build_openapi(&routes);
        let op = item(&api, "/things").get.as_ref().unwrap();
        assert!(op.parameters.is_empty());
    }

    #[test]
    fn duplicate_route_keeps_first() {
        let mut second = ROUTES[0];
        second.description = "shadowed";
        let routes = [ROUTES[0], second];
        let api = build_openapi(&routes);
        let op = item(&api, "/api/demo").get.as_ref().unwrap();
        assert_eq!(op.description.as_deref(), Some(ROUTES[0].description));
    }
}
