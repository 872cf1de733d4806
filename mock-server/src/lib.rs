//! In-memory stand-in for the Suburb service.
//!
//! Implements the HTTP surface the client talks to with the simplest
//! possible semantics. Successful answers are wrapped as
//! `{"response": ...}`, failures as `{"error": "..."}`.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

type Key = (String, String);

#[derive(Default)]
pub struct Store {
    queues: BTreeMap<Key, VecDeque<Value>>,
    flags: BTreeMap<Key, Value>,
    logs: Vec<LogEntry>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    store: Arc<RwLock<Store>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueInfo {
    pub namespace: String,
    pub queue: String,
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlagInfo {
    pub namespace: String,
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub namespace: String,
    pub source: String,
    pub level: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct CreateQueue {
    pub namespace: String,
    pub queue: String,
}

#[derive(Deserialize)]
pub struct PushMessage {
    pub message: Value,
}

#[derive(Deserialize)]
pub struct SetFlag {
    pub value: Value,
}

#[derive(Deserialize)]
pub struct AddLog {
    pub source: String,
    pub level: String,
    pub message: String,
}

type Reply = (StatusCode, Json<Value>);

fn ok(value: impl Serialize) -> Reply {
    (StatusCode::OK, Json(json!({ "response": value })))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/queues", get(list_queues).post(create_queue))
        .route("/queues/{ns}/{name}", post(push_to_queue).delete(delete_queue))
        .route("/queues/{ns}/{name}/peek", get(peek_queue))
        .route("/queues/{ns}/{name}/pop", post(pop_queue))
        .route("/queues/{ns}/{name}/length", get(queue_length))
        .route("/flags", get(list_flags))
        .route("/flags/{ns}/{name}", get(get_flag).post(set_flag).delete(delete_flag))
        .route("/logs", get(list_logs))
        .route("/logs/{ns}", post(add_log))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

/// The key travels raw in `Authorization`, with no scheme prefix.
async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == &*state.api_key);
    if !authorized {
        tracing::debug!(path = %request.uri().path(), "rejected request without valid key");
        return fail(StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    next.run(request).await
}

// --- queues ---

async fn list_queues(State(state): State<AppState>) -> Reply {
    let store = state.store.read().await;
    let queues: Vec<QueueInfo> = store
        .queues
        .iter()
        .map(|((namespace, queue), messages)| QueueInfo {
            namespace: namespace.clone(),
            queue: queue.clone(),
            length: messages.len(),
        })
        .collect();
    ok(queues)
}

async fn create_queue(State(state): State<AppState>, Json(input): Json<CreateQueue>) -> Reply {
    let mut store = state.store.write().await;
    let key = (input.namespace, input.queue);
    if store.queues.contains_key(&key) {
        return fail(StatusCode::CONFLICT, "queue already exists");
    }
    store.queues.insert(key, VecDeque::new());
    ok(true)
}

async fn push_to_queue(
    State(state): State<AppState>,
    Path(key): Path<Key>,
    Json(input): Json<PushMessage>,
) -> Reply {
    let mut store = state.store.write().await;
    match store.queues.get_mut(&key) {
        Some(queue) => {
            queue.push_back(input.message);
            ok(queue.len())
        }
        None => fail(StatusCode::NOT_FOUND, "queue not found"),
    }
}

async fn delete_queue(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let mut store = state.store.write().await;
    match store.queues.remove(&key) {
        Some(_) => ok(true),
        None => fail(StatusCode::NOT_FOUND, "queue not found"),
    }
}

async fn peek_queue(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let store = state.store.read().await;
    match store.queues.get(&key) {
        Some(queue) => match queue.front() {
            Some(message) => ok(message),
            None => fail(StatusCode::NOT_FOUND, "queue is empty"),
        },
        None => fail(StatusCode::NOT_FOUND, "queue not found"),
    }
}

async fn pop_queue(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let mut store = state.store.write().await;
    match store.queues.get_mut(&key) {
        Some(queue) => match queue.pop_front() {
            Some(message) => ok(message),
            None => fail(StatusCode::NOT_FOUND, "queue is empty"),
        },
        None => fail(StatusCode::NOT_FOUND, "queue not found"),
    }
}

async fn queue_length(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let store = state.store.read().await;
    match store.queues.get(&key) {
        Some(queue) => ok(queue.len()),
        None => fail(StatusCode::NOT_FOUND, "queue not found"),
    }
}

// --- flags ---

async fn list_flags(State(state): State<AppState>) -> Reply {
    let store = state.store.read().await;
    let flags: Vec<FlagInfo> = store
        .flags
        .iter()
        .map(|((namespace, name), value)| FlagInfo {
            namespace: namespace.clone(),
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    ok(flags)
}

async fn get_flag(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let store = state.store.read().await;
    match store.flags.get(&key) {
        Some(value) => ok(value),
        None => fail(StatusCode::NOT_FOUND, "flag not found"),
    }
}

async fn set_flag(
    State(state): State<AppState>,
    Path(key): Path<Key>,
    Json(input): Json<SetFlag>,
) -> Reply {
    let mut store = state.store.write().await;
    store.flags.insert(key, input.value.clone());
    ok(input.value)
}

async fn delete_flag(State(state): State<AppState>, Path(key): Path<Key>) -> Reply {
    let mut store = state.store.write().await;
    match store.flags.remove(&key) {
        Some(_) => ok(true),
        None => fail(StatusCode::NOT_FOUND, "flag not found"),
    }
}

// --- logs ---

async fn list_logs(State(state): State<AppState>) -> Reply {
    let store = state.store.read().await;
    ok(&store.logs)
}

async fn add_log(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(input): Json<AddLog>,
) -> Reply {
    let entry = LogEntry {
        id: Uuid::new_v4(),
        namespace,
        source: input.source,
        level: input.level,
        message: input.message,
    };
    state.store.write().await.logs.push(entry.clone());
    ok(entry)
}
