// Stub personality backend served on an ephemeral port for client tests.
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
    time::Duration,
};

// What the stub saw on the wire for a single request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Backend {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

// Replies according to the handle so one server covers every status branch.
async fn personality(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend
        .seen
        .lock()
        .expect("seen mutex poisoned")
        .push(SeenRequest {
            accept: header_value(&headers, header::ACCEPT),
            content_type: header_value(&headers, header::CONTENT_TYPE),
            body: body.clone(),
        });

    let handle = body["twitterHandle"].as_str().unwrap_or_default().to_string();
    match handle.as_str() {
        "missing" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "handle not found" })),
        ),
        "down" => (StatusCode::BAD_GATEWAY, Json(json!({ "message": "ignored" }))),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            (StatusCode::OK, Json(json!({})))
        }
        _ => (
            StatusCode::OK,
            Json(json!({
                "coverage": 0.523,
                "userName": handle,
                "big5_openness": 0.801,
                "big5_conscientiousness": 0.4,
                "big5_extraversion": 0.2,
                "big5_agreeableness": 0.9,
                "big5_neuroticism": 0.15,
                "wordCount": 812
            })),
        ),
    }
}

// Start the stub on the current runtime and return its base URL.
pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/personality", post(personality))
        .with_state(backend.clone());

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend failed");
    });

    (format!("http://{addr}"), backend)
}

// Server without the personality route; every request gets a 404.
pub async fn spawn_empty_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        axum::serve(listener, Router::new())
            .await
            .expect("empty backend failed");
    });

    format!("http://{addr}")
}

// Writer shared between the console page and the test body.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("buffer mutex poisoned").clone())
            .expect("console output should be utf-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("buffer mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
