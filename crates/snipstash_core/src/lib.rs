//! Core domain library for SnipStash (config, storage, models, query contract).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Snippet store backed by redb.
pub mod db;
/// Process environment helpers.
pub mod env;
/// Application error types (validation/storage).
pub mod error;
/// Data models for persistence and the HTTP wire format.
pub mod models;
/// Shared list predicate used by the store and client caches.
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_PORT, MAX_TITLE_CHARS};
pub use db::Database;
pub use error::{AppError, MissingFields, ValidationError};
pub use query::SnippetFilter;
