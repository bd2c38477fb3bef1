//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_ENVIRONMENT, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT};
use crate::env::non_empty_var;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for SnipStash.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_body_size: usize,
    /// Label reported by the health endpoint (`SNIPSTASH_ENV`).
    pub environment: String,
    /// Directory holding a single-page UI build, served for non-API paths.
    pub static_dir: Option<String>,
    pub auto_backup: bool,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Some(home) = non_empty_var("HOME") {
        return Some(PathBuf::from(home));
    }

    // Windows
    if let Some(profile) = non_empty_var("USERPROFILE") {
        return Some(PathBuf::from(profile));
    }

    std::env::current_dir().ok()
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("snipstash")
        .join("db")
        .to_string_lossy()
        .to_string()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match non_empty_var(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}='{}'", name, raw);
            default
        }),
        None => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: non_empty_var("DB_PATH")
                .map(expand_tilde)
                .unwrap_or_else(default_db_path),
            port: parsed_var("PORT", DEFAULT_PORT),
            max_body_size: parsed_var("MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE),
            environment: non_empty_var("SNIPSTASH_ENV")
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            static_dir: non_empty_var("STATIC_DIR").map(expand_tilde),
            auto_backup: env_flag_enabled("AUTO_BACKUP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_env_flag, Config};
    use crate::constants::{DEFAULT_ENVIRONMENT, DEFAULT_PORT};
    use crate::env::{env_lock, EnvGuard};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn from_env_applies_defaults_and_overrides() {
        let _lock = env_lock().lock().expect("env lock");
        let _port = EnvGuard::set("PORT", "not-a-port");
        let _env = EnvGuard::remove("SNIPSTASH_ENV");
        let _static = EnvGuard::set("STATIC_DIR", "  ");
        let _db = EnvGuard::set("DB_PATH", "/tmp/snipstash-config-test");
        let _backup = EnvGuard::set("AUTO_BACKUP", "yes");

        let config = Config::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, DEFAULT_ENVIRONMENT);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.db_path, "/tmp/snipstash-config-test");
        assert!(config.auto_backup);
    }

    #[test]
    fn from_env_expands_tilde_in_db_path() {
        let _lock = env_lock().lock().expect("env lock");
        let _home = EnvGuard::set("HOME", "/home/snip");
        let _db = EnvGuard::set("DB_PATH", "~/data/db");
        let _port = EnvGuard::set("PORT", "6100");

        let config = Config::from_env();
        assert!(config.db_path.ends_with("data/db"), "{}", config.db_path);
        assert!(config.db_path.starts_with("/home/snip"), "{}", config.db_path);
        assert_eq!(config.port, 6100);
    }
}
