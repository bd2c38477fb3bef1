//! Client-side sync layer for the SnipStash API.
//!
//! [`SnippetApi`] talks HTTP, [`SyncState`] is the reducer-driven local cache,
//! and [`SnippetSync`] ties the two together so every server response is
//! merged into local state the same way.

/// HTTP client for the snippet API.
pub mod api;
/// Client error type.
pub mod error;
/// Reducer-driven local snippet cache.
pub mod state;
/// Fetch/write driver over [`api::SnippetApi`] and [`state::SyncState`].
pub mod sync;

pub use api::SnippetApi;
pub use error::ClientError;
pub use state::{Action, FetchStatus, SyncState, Theme};
pub use sync::SnippetSync;
