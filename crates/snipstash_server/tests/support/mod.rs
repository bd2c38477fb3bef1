//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use serde_json::{json, Value};
use snipstash_server::{create_app, AppState, Config, Database};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_body_size: 1024 * 1024,
        environment: "test".to_string(),
        static_dir: None,
        auto_backup: false,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = test_config_for_db_path(&db_path);
    (test_server_for_config(config), temp_dir)
}

/// Create a snippet through the API and return its JSON record.
pub(crate) async fn create_snippet(
    server: &TestServer,
    title: &str,
    language: &str,
    code: &str,
) -> Value {
    let response = server
        .post("/api/snippets")
        .json(&json!({ "title": title, "language": language, "code": code }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["snippet"].clone()
}

pub(crate) fn titles(list_body: &Value) -> Vec<String> {
    list_body["snippets"]
        .as_array()
        .expect("snippets array")
        .iter()
        .map(|s| s["title"].as_str().expect("title").to_string())
        .collect()
}
