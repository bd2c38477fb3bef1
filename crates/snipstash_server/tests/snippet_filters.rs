//! Search and language filter behavior over HTTP.

mod support;

use axum_test::TestServer;
use serde_json::Value;
use support::{create_snippet, setup_test_server, titles};

async fn seed(server: &TestServer) {
    create_snippet(server, "Debounce helper", "JavaScript", "function debounce(fn) {}").await;
    create_snippet(server, "Quick sort", "Python", "def quicksort(xs): return xs").await;
    create_snippet(server, "Fetch wrapper", "TypeScript", "const FOO = await fetch(url);").await;
    create_snippet(server, "Rust foo", "rust", "fn main() {}").await;
}

async fn list_with(server: &TestServer, params: &[(&str, &str)]) -> Value {
    let mut request = server.get("/api/snippets");
    for (key, value) in params {
        request = request.add_query_param(key, value);
    }
    request.await.json()
}

#[tokio::test]
async fn search_matches_title_or_code_case_insensitively() {
    let (server, _temp) = setup_test_server();
    seed(&server).await;

    let body = list_with(&server, &[("search", "foo")]).await;
    assert_eq!(titles(&body), vec!["Rust foo", "Fetch wrapper"]);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn language_filter_matches_partial_language() {
    let (server, _temp) = setup_test_server();
    seed(&server).await;

    let body = list_with(&server, &[("language", "Script")]).await;
    assert_eq!(titles(&body), vec!["Fetch wrapper", "Debounce helper"]);

    let body = list_with(&server, &[("language", "java")]).await;
    assert_eq!(titles(&body), vec!["Debounce helper"]);
}

#[tokio::test]
async fn search_and_language_combine_with_and() {
    let (server, _temp) = setup_test_server();
    seed(&server).await;

    let body = list_with(&server, &[("search", "foo"), ("language", "rust")]).await;
    assert_eq!(titles(&body), vec!["Rust foo"]);

    let body = list_with(&server, &[("search", "sort"), ("language", "rust")]).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn blank_parameters_are_ignored() {
    let (server, _temp) = setup_test_server();
    seed(&server).await;

    let body = list_with(&server, &[("search", ""), ("language", "  ")]).await;
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn stored_language_is_lowercase_so_filters_see_normalized_values() {
    let (server, _temp) = setup_test_server();
    seed(&server).await;

    let body = list_with(&server, &[("language", "PYTHON")]).await;
    let snippets = body["snippets"].as_array().expect("array");
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0]["language"], "python");
}
