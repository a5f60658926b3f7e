//! HTTP routes.
//!
//! Every top-level kind exposes the same seven routes under its plural
//! prefix. Validation and guard failures are ordinary 200 responses whose
//! body carries the annotated entity; only missing nodes and store faults
//! become error statuses.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use playbill_domain::{Character, Person, Playtext, Production, Theatre};

use crate::app::App;
use crate::infrastructure::ports::StoreError;
use crate::persistence::Persistable;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .nest("/theatres", kind_routes::<Theatre>())
        .nest("/people", kind_routes::<Person>())
        .nest("/playtexts", kind_routes::<Playtext>())
        .nest("/productions", kind_routes::<Production>())
        .nest("/characters", kind_routes::<Character>())
}

fn kind_routes<E: Persistable>() -> Router<Arc<App>> {
    Router::new()
        .route("/new", get(new_entity::<E>))
        .route("/", get(list::<E>).post(create::<E>))
        .route("/{uuid}/edit", get(edit::<E>))
        .route(
            "/{uuid}",
            get(show::<E>).put(update::<E>).delete(delete_entity::<E>),
        )
}

async fn health() -> &'static str {
    "OK"
}

async fn new_entity<E: Persistable>() -> Json<E> {
    Json(E::default())
}

async fn create<E: Persistable>(
    State(app): State<Arc<App>>,
    Json(entity): Json<E>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(app.service.create(entity).await?))
}

async fn edit<E: Persistable>(
    State(app): State<Arc<App>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(app.service.edit::<E>(uuid).await?))
}

async fn update<E: Persistable>(
    State(app): State<Arc<App>>,
    Path(uuid): Path<Uuid>,
    Json(entity): Json<E>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(app.service.update(uuid, entity).await?))
}

async fn delete_entity<E: Persistable>(
    State(app): State<Arc<App>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<E>, ApiError> {
    Ok(Json(app.service.delete::<E>(uuid).await?))
}

async fn show<E: Persistable>(
    State(app): State<Arc<App>>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(app.service.show::<E>(uuid).await?))
}

async fn list<E: Persistable>(State(app): State<Arc<App>>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(app.service.list::<E>().await?))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        if error.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockQueryExecutor;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    const UUID: &str = "11111111-2222-3333-4444-555555555555";

    fn router(store: MockQueryExecutor) -> Router {
        routes().with_state(Arc::new(App::new(Arc::new(store))))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_probe_responds() {
        let response = router(MockQueryExecutor::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn new_returns_a_blank_entity() {
        let response = router(MockQueryExecutor::new())
            .oneshot(
                Request::builder()
                    .uri("/theatres/new")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "model": "theatre",
                "name": "",
                "differentiator": "",
                "errors": {}
            })
        );
    }

    #[tokio::test]
    async fn invalid_create_is_a_200_with_the_annotated_entity() {
        let mut store = MockQueryExecutor::new();
        store.expect_execute().times(0);

        let response = router(store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/theatres")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{ "name": "" }"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["hasErrors"], json!(true));
        assert_eq!(body["errors"]["name"], json!(["Value is too short"]));
    }

    #[tokio::test]
    async fn successful_create_returns_the_persisted_entity() {
        let mut store = MockQueryExecutor::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![json!(0)]));
        store
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![json!({
                    "model": "theatre",
                    "uuid": UUID,
                    "name": "Almeida Theatre",
                    "differentiator": ""
                })])
            });

        let response = router(store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/theatres")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{ "name": "Almeida Theatre" }"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "model": "theatre",
                "uuid": UUID,
                "name": "Almeida Theatre",
                "differentiator": "",
                "errors": {}
            })
        );
    }

    #[tokio::test]
    async fn blocked_delete_is_a_200_carrying_the_guard_key() {
        let mut store = MockQueryExecutor::new();
        store.expect_execute().times(1).returning(|_| {
            Ok(vec![json!({
                "model": "character",
                "uuid": UUID,
                "name": "Hamlet",
                "differentiator": "",
                "dependentAssociations": ["playtexts"]
            })])
        });

        let response = router(store)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&format!("/characters/{UUID}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["hasErrors"], json!(true));
        assert_eq!(body["errors"]["dependentAssociations"], json!(["playtexts"]));
    }

    #[tokio::test]
    async fn missing_node_maps_to_404() {
        let mut store = MockQueryExecutor::new();
        store.expect_execute().times(1).returning(|_| Ok(vec![]));

        let response = router(store)
            .oneshot(
                Request::builder()
                    .uri(&format!("/playtexts/{UUID}/edit"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_maps_to_500() {
        let mut store = MockQueryExecutor::new();
        store
            .expect_execute()
            .times(1)
            .returning(|_| Err(StoreError::database("list", "connection reset")));

        let response = router(store)
            .oneshot(
                Request::builder()
                    .uri("/people")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn list_returns_summary_rows() {
        let mut store = MockQueryExecutor::new();
        store.expect_execute().times(1).returning(|_| {
            Ok(vec![
                json!({ "model": "production", "uuid": UUID, "name": "Hamlet" }),
            ])
        });

        let response = router(store)
            .oneshot(
                Request::builder()
                    .uri("/productions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{ "model": "production", "uuid": UUID, "name": "Hamlet" }])
        );
    }
}
