//! Typed HTTP client for the snippet endpoints.

use crate::error::ClientError;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snipstash_core::models::snippet::{CreateSnippetRequest, Snippet, UpdateSnippetRequest};
use snipstash_core::models::wire::{CreatedSnippetResponse, ErrorResponse, HealthResponse, MessageResponse};
use snipstash_core::SnippetFilter;
use std::time::Duration;

/// `{snippets}` envelope; `count` and any other keys are ignored.
#[derive(Deserialize)]
struct WrappedList {
    snippets: Vec<Snippet>,
}

/// List bodies are accepted in both the wrapped and the bare-array shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Wrapped(WrappedList),
    Bare(Vec<Snippet>),
}

impl ListPayload {
    fn into_snippets(self) -> Vec<Snippet> {
        match self {
            Self::Wrapped(list) => list.snippets,
            Self::Bare(snippets) => snippets,
        }
    }
}

/// Client for one SnipStash server.
#[derive(Debug, Clone)]
pub struct SnippetApi {
    http: reqwest::Client,
    base: Url,
}

impl SnippetApi {
    /// Build a client for `server` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] when `server` is not an absolute
    /// HTTP base URL, or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(server: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(server.trim())
            .map_err(|err| ClientError::InvalidUrl(format!("'{}': {}", server, err)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "'{}' cannot be used as an API base",
                server
            )));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        api_url(&self.base, segments)
    }

    /// Fetch snippets matching `filter`, newest first.
    pub async fn list(&self, filter: &SnippetFilter) -> Result<Vec<Snippet>, ClientError> {
        let mut url = self.url(&["api", "snippets"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = filter.search() {
                pairs.append_pair("search", search);
            }
            if let Some(language) = filter.language() {
                pairs.append_pair("language", language);
            }
        }
        // An empty pair list leaves a trailing `?`.
        if url.query() == Some("") {
            url.set_query(None);
        }

        tracing::debug!(url = %url, "listing snippets");
        let response = self.http.get(url).send().await?;
        let payload: ListPayload = decode(response).await?;
        Ok(payload.into_snippets())
    }

    /// Fetch one snippet by id.
    pub async fn get(&self, id: &str) -> Result<Snippet, ClientError> {
        let url = self.url(&["api", "snippets", id])?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// Create a snippet and return the stored record.
    pub async fn create(&self, request: &CreateSnippetRequest) -> Result<Snippet, ClientError> {
        let url = self.url(&["api", "snippets"])?;
        let response = self.http.post(url).json(request).send().await?;
        let created: CreatedSnippetResponse = decode(response).await?;
        Ok(created.snippet)
    }

    /// Apply a partial update and return the stored record.
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateSnippetRequest,
    ) -> Result<Snippet, ClientError> {
        let url = self.url(&["api", "snippets", id])?;
        let response = self.http.put(url).json(request).send().await?;
        decode(response).await
    }

    /// Delete a snippet and return the server's confirmation message.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        let url = self.url(&["api", "snippets", id])?;
        let response = self.http.delete(url).send().await?;
        let body: MessageResponse = decode(response).await?;
        Ok(body.message)
    }

    /// Query server liveness.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.url(&["api", "health"])?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn api_url(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            ClientError::InvalidUrl(format!("'{}' cannot be used as an API base", base))
        })?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Pick the most useful message from an error body.
pub(crate) fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => error.message,
        Err(_) => body.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = error_message_for_response(status, &body);
        tracing::debug!(%status, %message, "request rejected");
        return Err(ClientError::Api { status, message });
    }
    serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_encodes_path_segments() {
        let base = Url::parse("http://localhost:5000").expect("url");
        let url = api_url(&base, &["api", "snippets", "a b/c"]).expect("api url");
        assert_eq!(url.as_str(), "http://localhost:5000/api/snippets/a%20b%2Fc");
    }

    #[test]
    fn api_url_appends_segments_to_existing_base_path() {
        let base = Url::parse("http://localhost:5000/stash/").expect("url");
        let url = api_url(&base, &["api", "health"]).expect("api url");
        assert_eq!(url.as_str(), "http://localhost:5000/stash/api/health");
    }

    #[test]
    fn new_rejects_unusable_server_urls() {
        let timeout = Duration::from_secs(1);
        assert!(matches!(
            SnippetApi::new("not a url", timeout),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            SnippetApi::new("mailto:someone@example.com", timeout),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn error_message_prefers_json_message_field() {
        let body = r#"{"message":"Snippet not found"}"#;
        assert_eq!(
            error_message_for_response(StatusCode::NOT_FOUND, body),
            "Snippet not found"
        );
        assert_eq!(
            error_message_for_response(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn error_message_uses_reason_for_empty_body() {
        assert_eq!(
            error_message_for_response(StatusCode::BAD_REQUEST, "  "),
            "Bad Request"
        );
    }

    #[test]
    fn list_payload_accepts_both_shapes() {
        let snippet = r#"{"id":"1","title":"t","language":"rust","code":"x","createdAt":"2024-01-01T00:00:00Z"}"#;
        let wrapped = format!(r#"{{"snippets":[{}],"count":1}}"#, snippet);
        let wrapped_without_count = format!(r#"{{"snippets":[{}]}}"#, snippet);
        let bare = format!("[{}]", snippet);

        for body in [wrapped, wrapped_without_count, bare] {
            let payload: ListPayload = serde_json::from_str(&body).expect("payload");
            let snippets = payload.into_snippets();
            assert_eq!(snippets.len(), 1);
            assert_eq!(snippets[0].id, "1");
        }
    }
}
