//! Snippet HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use snipstash_core::{
    models::{snippet::*, wire::*},
    SnippetFilter,
};

/// List snippets, optionally filtered by `search` and `language`.
///
/// # Returns
/// `{snippets, count}` ordered newest first.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub async fn list_snippets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SnippetListResponse>, HttpError> {
    let filter = SnippetFilter::from(&query);
    let snippets = state.db.snippets.list(&filter)?;
    tracing::debug!(
        search = ?filter.search(),
        language = ?filter.language(),
        count = snippets.len(),
        "listed snippets"
    );
    Ok(Json(SnippetListResponse::from(snippets)))
}

/// Fetch a snippet by id.
///
/// # Errors
/// Returns 404 when the id is unknown.
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, HttpError> {
    Ok(Json(state.db.snippets.get(&id)?))
}

/// Create a snippet.
///
/// # Returns
/// `201 {snippet}` with the stored, normalized record.
///
/// # Errors
/// Returns 400 with a `missing` map when required fields are absent or blank,
/// 400 for an oversized title or malformed body.
pub async fn create_snippet(
    State(state): State<AppState>,
    payload: Result<Json<CreateSnippetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedSnippetResponse>), HttpError> {
    let Json(req) = payload?;
    let snippet = state.db.snippets.create(&req)?;
    tracing::info!(id = %snippet.id, language = %snippet.language, "snippet created");
    Ok((StatusCode::CREATED, Json(CreatedSnippetResponse { snippet })))
}

/// Update a snippet with a partial payload.
///
/// # Returns
/// The full updated record.
///
/// # Errors
/// Returns 404 for unknown ids and 400 when the merged record is invalid.
pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSnippetRequest>, JsonRejection>,
) -> Result<Json<Snippet>, HttpError> {
    let Json(req) = payload?;
    let updated = state.db.snippets.update(&id, &req)?;
    tracing::info!(id = %updated.id, "snippet updated");
    Ok(Json(updated))
}

/// Delete a snippet permanently.
///
/// # Errors
/// Returns 404 when the id is unknown.
pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, HttpError> {
    let deleted = state.db.snippets.delete(&id)?;
    tracing::info!(id = %deleted.id, "snippet deleted");
    Ok(Json(MessageResponse {
        message: "Snippet removed".to_string(),
    }))
}
