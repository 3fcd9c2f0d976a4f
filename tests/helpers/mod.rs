use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[ctor::ctor]
fn init() {
    notesync::util::testing::init_test_setup().expect("Failed to initialize test setup");
}

/// Id the fake API assigns to every created post
#[allow(dead_code)]
pub const CREATED_ID: i64 = 101;

/// Behavior and request log of the fake `/posts` API
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FakeApi {
    pub posts: Vec<Value>,
    pub list_fails: bool,
    pub failing_ids: Vec<i64>,
    /// Ids whose PUT answers 200 with a body that is not JSON
    pub garbled_ids: Vec<i64>,
    pub requests: Vec<(String, Option<Value>)>,
}

#[allow(dead_code)]
impl FakeApi {
    /// Posts `1..=count` shaped like the real collection
    pub fn with_posts(count: i64) -> Self {
        Self {
            posts: (1..=count).map(|id| post(id, &format!("post {}", id))).collect(),
            ..Self::default()
        }
    }
}

#[allow(dead_code)]
pub fn post(id: i64, title: &str) -> Value {
    json!({"userId": 1, "id": id, "title": title, "body": format!("body of {}", id)})
}

type SharedApi = Arc<Mutex<FakeApi>>;

/// In-process HTTP server standing in for the remote collection
#[allow(dead_code)]
pub struct FakeServer {
    pub base_url: String,
    api: SharedApi,
}

#[allow(dead_code)]
impl FakeServer {
    pub async fn start(api: FakeApi) -> Result<Self> {
        let api = Arc::new(Mutex::new(api));
        let app = Router::new()
            .route("/posts", get(list_posts).post(create_post))
            .route("/posts/:id", put(update_post).delete(delete_post))
            .with_state(api.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind fake server")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            api,
        })
    }

    /// `"VERB /path"` plus JSON body of every request received
    pub fn requests(&self) -> Vec<(String, Option<Value>)> {
        self.api.lock().unwrap().requests.clone()
    }
}

async fn list_posts(State(api): State<SharedApi>) -> Result<Json<Value>, StatusCode> {
    let mut api = api.lock().unwrap();
    api.requests.push(("GET /posts".to_string(), None));
    if api.list_fails {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(Value::Array(api.posts.clone())))
}

async fn create_post(
    State(api): State<SharedApi>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut api = api.lock().unwrap();
    api.requests.push(("POST /posts".to_string(), Some(body.clone())));
    let mut created = body;
    created["id"] = json!(CREATED_ID);
    (StatusCode::CREATED, Json(created))
}

async fn update_post(
    State(api): State<SharedApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, StatusCode> {
    let mut api = api.lock().unwrap();
    api.requests
        .push((format!("PUT /posts/{}", id), Some(body.clone())));
    if api.failing_ids.contains(&id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if api.garbled_ids.contains(&id) {
        return Ok((StatusCode::OK, r#"{"id": 5, "tit"#).into_response());
    }
    Ok(Json(body).into_response())
}

async fn delete_post(State(api): State<SharedApi>, Path(id): Path<i64>) -> StatusCode {
    let mut api = api.lock().unwrap();
    api.requests.push((format!("DELETE /posts/{}", id), None));
    if api.failing_ids.contains(&id) {
        return StatusCode::NOT_FOUND;
    }
    StatusCode::OK
}
