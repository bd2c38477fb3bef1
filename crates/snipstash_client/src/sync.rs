//! Drives [`SnippetApi`] calls and folds their outcomes into [`SyncState`].

use crate::api::SnippetApi;
use crate::error::ClientError;
use crate::state::{Action, SyncState};
use snipstash_core::models::snippet::{CreateSnippetRequest, Snippet, UpdateSnippetRequest};
use snipstash_core::SnippetFilter;

/// API client plus the local cache it keeps current.
#[derive(Debug)]
pub struct SnippetSync {
    api: SnippetApi,
    state: SyncState,
}

impl SnippetSync {
    pub fn new(api: SnippetApi) -> Self {
        Self {
            api,
            state: SyncState::new(),
        }
    }

    pub fn api(&self) -> &SnippetApi {
        &self.api
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Apply a local action such as a theme toggle or filter change.
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.state.apply(action)
    }

    /// Reload the cache with a server-side filtered list.
    ///
    /// # Errors
    /// Returns the fetch error after recording it in the state.
    pub async fn refresh(&mut self, filter: &SnippetFilter) -> Result<&[Snippet], ClientError> {
        let request_id = self.state.begin_fetch();
        match self.api.list(filter).await {
            Ok(snippets) => {
                self.state.apply(Action::FetchSucceeded {
                    request_id,
                    snippets,
                });
                Ok(self.state.snippets())
            }
            Err(err) => {
                tracing::warn!(error = %err, "snippet list fetch failed");
                self.state.apply(Action::FetchFailed {
                    request_id,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Create a snippet and prepend it to the cache.
    pub async fn create(&mut self, request: &CreateSnippetRequest) -> Result<Snippet, ClientError> {
        let result = self.api.create(request).await;
        self.record_write(result, |snippet| Action::Created { snippet })
    }

    /// Update a snippet and replace the cached copy.
    pub async fn update(
        &mut self,
        id: &str,
        request: &UpdateSnippetRequest,
    ) -> Result<Snippet, ClientError> {
        let result = self.api.update(id, request).await;
        self.record_write(result, |snippet| Action::Updated { snippet })
    }

    /// Delete a snippet and drop it from the cache.
    pub async fn delete(&mut self, id: &str) -> Result<String, ClientError> {
        match self.api.delete(id).await {
            Ok(message) => {
                self.state.apply(Action::Deleted { id: id.to_string() });
                Ok(message)
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "snippet delete failed");
                self.state.apply(Action::WriteFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn record_write(
        &mut self,
        result: Result<Snippet, ClientError>,
        on_success: impl FnOnce(Snippet) -> Action,
    ) -> Result<Snippet, ClientError> {
        match result {
            Ok(snippet) => {
                self.state.apply(on_success(snippet.clone()));
                Ok(snippet)
            }
            Err(err) => {
                tracing::warn!(error = %err, "snippet write failed");
                self.state.apply(Action::WriteFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
