//! Client error type.

use thiserror::Error;

/// Failure talking to the SnipStash API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Return `true` when the server reported an unknown snippet id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
