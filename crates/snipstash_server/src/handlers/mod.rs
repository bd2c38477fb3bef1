//! HTTP request handlers.

/// Snippet CRUD endpoints.
pub mod snippet;
/// Health, API 404 and static fallback.
pub mod system;
