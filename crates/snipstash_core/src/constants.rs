//! Shared constants used across SnipStash crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum request body accepted by the API layer.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Maximum snippet title length, counted in characters after trimming.
pub const MAX_TITLE_CHARS: usize = 100;

/// Default environment label reported by the health endpoint.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:5000";

/// Version stamped on every API response.
pub const API_VERSION: &str = "1";

/// Header carrying [`API_VERSION`].
pub const API_VERSION_HEADER: &str = "x-snipstash-api-version";
