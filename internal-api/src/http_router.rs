use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use costwatch_defs::StorageError;
use env_elasticsearch::{DocumentStore, StorageManager};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_EXECUTIONS_LIMIT: usize = 20;

type Storage<S> = State<Arc<StorageManager<S>>>;

#[derive(Deserialize)]
struct ExecutionsQuery {
    querylimit: Option<usize>,
}

#[derive(Deserialize)]
struct ResourcesQuery {
    #[serde(rename = "executionID")]
    execution_id: Option<String>,
}

pub fn create_router<S>(storage: Arc<StorageManager<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/summary/{execution_id}", get(get_summary::<S>))
        .route("/api/v1/executions", get(get_executions::<S>))
        .route("/api/v1/resources/{resource_type}", get(get_resources::<S>))
        .route("/api/v1/detect-events", post(detect_events::<S>))
        .with_state(storage)
}

fn error_response(e: StorageError) -> Response {
    error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": e.to_string()
        })),
    )
        .into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Every query string pair is treated as an additional match filter.
async fn get_summary<S: DocumentStore>(
    State(storage): Storage<S>,
    Path(execution_id): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    match storage.get_summary(&execution_id, &filters).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_executions<S: DocumentStore>(
    State(storage): Storage<S>,
    Query(query): Query<ExecutionsQuery>,
) -> Response {
    let limit = query.querylimit.unwrap_or(DEFAULT_EXECUTIONS_LIMIT);
    let executions = storage.get_executions(limit).await;
    (StatusCode::OK, Json(executions)).into_response()
}

async fn get_resources<S: DocumentStore>(
    State(storage): Storage<S>,
    Path(resource_type): Path<String>,
    Query(query): Query<ResourcesQuery>,
) -> Response {
    let Some(execution_id) = query.execution_id.filter(|id| !id.is_empty()) else {
        return bad_request("executionID query parameter is required");
    };

    match storage.get_resources(&resource_type, &execution_id).await {
        Ok(resources) => (StatusCode::OK, Json(resources)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Accepts a single event document or an array of them and indexes each one.
async fn detect_events<S: DocumentStore>(
    State(storage): Storage<S>,
    Json(body): Json<Value>,
) -> Response {
    let documents = match body {
        Value::Array(documents) => documents,
        document @ Value::Object(_) => vec![document],
        _ => return bad_request("expected an event object or an array of events"),
    };

    let mut saved = 0;
    let mut failed = 0;
    for document in &documents {
        match storage.save(document).await {
            Ok(()) => saved += 1,
            Err(_) => failed += 1,
        }
    }

    info!("saved {} of {} detected events", saved, documents.len());
    (
        StatusCode::ACCEPTED,
        Json(json!({
            "saved": saved,
            "failed": failed
        })),
    )
        .into_response()
}
