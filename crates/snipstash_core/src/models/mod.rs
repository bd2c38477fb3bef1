//! Data models shared by storage, the HTTP layer and clients.

/// Snippet records, write payloads and field validation.
pub mod snippet;
/// JSON response envelopes.
pub mod wire;
