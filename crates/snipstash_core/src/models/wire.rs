//! JSON envelopes exchanged between the server and its clients.

use super::snippet::Snippet;
use crate::error::MissingFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /api/snippets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub language: Option<String>,
}

/// Body of `GET /api/snippets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetListResponse {
    pub snippets: Vec<Snippet>,
    pub count: usize,
}

impl From<Vec<Snippet>> for SnippetListResponse {
    fn from(snippets: Vec<Snippet>) -> Self {
        Self {
            count: snippets.len(),
            snippets,
        }
    }
}

/// Body of a successful `POST /api/snippets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSnippetResponse {
    pub snippet: Snippet,
}

/// Plain confirmation message (deletes, unmatched routes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned for every failed API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<MissingFields>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
}
