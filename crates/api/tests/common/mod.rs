//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use facepair_api::config::ServerConfig;
use facepair_api::router::build_app_router;
use facepair_api::sessions::SessionStore;
use facepair_api::state::AppState;
use facepair_core::pairs::parse_pairs;
use facepair_core::ImageResolver;
use facepair_sheets::{MemorySheet, SheetWriter};

/// Two-pair table used by most tests: pair 0 is truly `same`, pair 1 is
/// truly `different`.
pub const TEST_TABLE: &str = "index,A,B,ground_truth,celeb_id\n\
                              0,img1.jpg,img2.jpg,same,1234\n\
                              1,img3.jpg,img4.jpg,different,5678\n";

/// Base URL the default (remote-mode) resolver prefixes identifiers with.
pub const TEST_IMAGE_BASE: &str = "https://imgs.example.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        pairs_csv: "pairs.csv".to_string(),
        image_base_path: "images/".to_string(),
        use_image_urls: true,
        image_url_base: TEST_IMAGE_BASE.to_string(),
        spreadsheet_id: None,
        credentials_file: "credentials.json".to_string(),
    }
}

/// A built application plus its state, so tests can inspect the writer.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// The in-memory sheet, when the app was built with the Memory writer.
    pub fn sheet(&self) -> &MemorySheet {
        match &*self.state.writer {
            SheetWriter::Memory(sheet) => sheet,
            _ => panic!("test app was not built with the Memory writer"),
        }
    }
}

/// Build the app over [`TEST_TABLE`] with the in-memory writer and the
/// remote-URL resolver.
pub fn build_test_app() -> TestApp {
    build_test_app_with(
        SheetWriter::Memory(MemorySheet::new()),
        ImageResolver::RemoteUrl(TEST_IMAGE_BASE.to_string()),
    )
}

/// Build the app with a specific writer and resolver.
///
/// This mirrors the state and router construction in `main.rs` so
/// integration tests exercise the same middleware stack that production
/// uses.
pub fn build_test_app_with(writer: SheetWriter, resolver: ImageResolver) -> TestApp {
    let config = test_config();
    let state = AppState {
        pairs: Arc::new(parse_pairs(TEST_TABLE).expect("test table must parse")),
        resolver: Arc::new(resolver),
        sessions: Arc::new(SessionStore::new()),
        writer: Arc::new(writer),
        config: Arc::new(config.clone()),
    };
    let router = build_app_router(state.clone(), &config);
    TestApp { router, state }
}

/// Issue a GET request against the app.
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request must build"),
        )
        .await
        .expect("request must not fail")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request must build"),
        )
        .await
        .expect("request must not fail")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

/// Start a session for `annotator` and return its id.
pub async fn start_session(app: &Router, annotator: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/sessions",
        serde_json::json!({ "annotator_id": annotator }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["session_id"]
        .as_str()
        .expect("session_id must be a string")
        .to_string()
}

/// Fetch the session snapshot payload.
pub async fn snapshot(app: &Router, session_id: &str) -> Value {
    let response = get(app, &format!("/api/v1/sessions/{session_id}")).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["data"].clone()
}
