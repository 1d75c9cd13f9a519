//! Axum request handlers for all service endpoints.
//!
//! The demo handlers are pure echoes: no validation, no state, no side
//! effects. Body-taking handlers read the value attached by
//! [`super::body::parse_json_body`].

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, Method, Uri},
    response::{Html, IntoResponse},
    Extension, Json,
};
use common::{
    protocol::{CreateResponse, DeleteResponse, GetResponse, ItemBody, PatchResponse, StatusResponse},
    ApiError,
};

use super::{body::JsonBody, errors::Failure, state::AppState};
use crate::docs::ui::SWAGGER_UI_HTML;

/// `GET /api/demo` — hello world.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "OK".into(),
    })
}

/// `GET /api/demo/:id` — echo the id.
pub async fn get_by_id(
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<GetResponse>, Failure> {
    let get_id = path_id(id)?;
    Ok(Json(GetResponse { get_id }))
}

/// `DELETE /api/demo/:id` — echo the id.
pub async fn delete_by_id(
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, Failure> {
    let delete_id = path_id(id)?;
    Ok(Json(DeleteResponse { delete_id }))
}

/// `PATCH /api/demo/:id` — echo the id and the item fields of the body.
pub async fn patch_by_id(
    id: Result<Path<String>, PathRejection>,
    Extension(JsonBody(body)): Extension<JsonBody>,
) -> Result<Json<PatchResponse>, Failure> {
    let id = path_id(id)?;
    Ok(Json(PatchResponse::new(id, ItemBody::from_value(&body))))
}

/// `POST /api/demo` — echo the item fields of the body.
pub async fn create(Extension(JsonBody(body)): Extension<JsonBody>) -> Json<CreateResponse> {
    Json(ItemBody::from_value(&body).into())
}

/// `GET /api/docs` — generated OpenAPI document as JSON.
pub async fn docs_json(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.docs.json(),
    )
}

/// `GET /api/docs/openapi.yaml` — generated OpenAPI document as YAML.
pub async fn docs_yaml(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml")],
        state.docs.yaml(),
    )
}

/// `GET /api/docs/ui` — interactive Swagger UI over `/api/docs`.
pub async fn docs_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Fallback for any method + path pair without a route.
pub async fn not_found(method: Method, uri: Uri) -> Failure {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
    .into()
}

/// Unwrap the `:id` segment; extraction failures are handler faults.
fn path_id(id: Result<Path<String>, PathRejection>) -> Result<String, Failure> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => Err(ApiError::HandlerFault(rejection.body_text()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn status_says_ok() {
        let Json(body) = status().await;
        assert_eq!(body.message, "OK");
    }

    #[tokio::test]
    async fn get_by_id_echoes_literal_id() {
        let app: Router = Router::new().route("/items/:id", get(get_by_id));
        let req = Request::builder()
            .uri("/items/007")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"getID": "007"}));
    }

    #[tokio::test]
    async fn not_found_carries_failure() {
        let resp = not_found(Method::PUT, Uri::from_static("/api/demo"))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let failure = resp.extensions().get::<Failure>().unwrap();
        assert!(matches!(failure.error(), ApiError::RouteNotFound { .. }));
    }
}
