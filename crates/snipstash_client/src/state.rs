//! Local snippet cache mutated only through [`SyncState::apply`].

use snipstash_core::models::snippet::Snippet;
use snipstash_core::SnippetFilter;

/// Lifecycle of the most recent list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// State transitions accepted by [`SyncState::apply`].
#[derive(Debug, Clone)]
pub enum Action {
    /// A list fetch was issued with this request id.
    FetchStarted { request_id: u64 },
    /// A list fetch completed.
    FetchSucceeded {
        request_id: u64,
        snippets: Vec<Snippet>,
    },
    /// A list fetch failed.
    FetchFailed { request_id: u64, message: String },
    /// The server stored a new snippet.
    Created { snippet: Snippet },
    /// The server stored an update.
    Updated { snippet: Snippet },
    /// The server removed a snippet.
    Deleted { id: String },
    /// A create, update or delete was rejected.
    WriteFailed { message: String },
    /// Replace the client-side filter used by [`SyncState::visible`].
    SetLocalFilter { filter: SnippetFilter },
    /// Clear the last error.
    DismissError,
    ToggleTheme,
}

/// Client-side mirror of the server's snippet list.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    snippets: Vec<Snippet>,
    status: FetchStatus,
    error: Option<String>,
    local_filter: SnippetFilter,
    theme: Theme,
    latest_request: u64,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snippets in server order (newest first).
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Last unacknowledged error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn local_filter(&self) -> &SnippetFilter {
        &self.local_filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Id of the most recently issued fetch.
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Allocate the next fetch id and mark the state as loading.
    pub fn begin_fetch(&mut self) -> u64 {
        let request_id = self.latest_request.wrapping_add(1);
        self.apply(Action::FetchStarted { request_id });
        request_id
    }

    /// Cached snippets that pass the local filter.
    pub fn visible(&self) -> Vec<&Snippet> {
        self.local_filter.apply(&self.snippets)
    }

    /// Apply one transition.
    ///
    /// Returns `false` when the action was ignored because it answers a fetch
    /// that has since been superseded.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::FetchStarted { request_id } => {
                self.latest_request = request_id;
                self.status = FetchStatus::Loading;
            }
            Action::FetchSucceeded {
                request_id,
                snippets,
            } => {
                if request_id != self.latest_request {
                    tracing::debug!(request_id, latest = self.latest_request, "dropping stale list");
                    return false;
                }
                self.snippets = snippets;
                self.status = FetchStatus::Ready;
                self.error = None;
            }
            Action::FetchFailed {
                request_id,
                message,
            } => {
                if request_id != self.latest_request {
                    tracing::debug!(request_id, latest = self.latest_request, "dropping stale failure");
                    return false;
                }
                self.status = FetchStatus::Failed;
                self.error = Some(message);
            }
            Action::Created { snippet } => {
                self.snippets.retain(|existing| existing.id != snippet.id);
                self.snippets.insert(0, snippet);
            }
            Action::Updated { snippet } => {
                if let Some(slot) = self.snippets.iter_mut().find(|s| s.id == snippet.id) {
                    *slot = snippet;
                }
            }
            Action::Deleted { id } => {
                self.snippets.retain(|snippet| snippet.id != id);
            }
            Action::WriteFailed { message } => {
                self.error = Some(message);
            }
            Action::SetLocalFilter { filter } => {
                self.local_filter = filter;
            }
            Action::DismissError => {
                self.error = None;
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
            }
        }
        true
    }
}
