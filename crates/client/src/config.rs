//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MANIFEST_API_BASE_URL`: API origin, e.g. `https://api.example.com`
//! - `MANIFEST_API_USERNAME`: Username for the token endpoint
//! - `MANIFEST_API_PASSWORD`: Password for the token endpoint
//! - `MANIFEST_ACCEPT_INVALID_CERTS`: Allow self-signed TLS (true/false)
//! - `MANIFEST_REQUEST_TIMEOUT_SECS`: Transport timeout for ordinary calls
//! - `MANIFEST_SYNC_TIMEOUT_SECS`: Transport timeout for sync submissions
//! - `MANIFEST_POLL_INTERVAL_SECS`: Delay between status polls
//! - `MANIFEST_WAIT_TIMEOUT_SECS`: Overall budget for awaiting completion
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./manifest.json` or `./manifest.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::time::Duration;

use manifest_domain::constants::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SYNC_TIMEOUT_SECS,
    DEFAULT_WAIT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to assemble a usable [`ClientConfig`].
#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(pub String);

/// Endpoint, credential, and timing settings for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API origin without a trailing slash, e.g. `https://api.example.com`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Permit self-signed TLS certificates. Off unless explicitly enabled.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_sync_timeout_secs() -> u64 {
    DEFAULT_SYNC_TIMEOUT_SECS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_wait_timeout_secs() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Long transport budget for sync submissions, which block server-side
    /// until processing finishes.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns [`ConfigError`] if configuration cannot be loaded from either
/// source, the file format is invalid, or required fields are missing.
pub fn load() -> Result<ClientConfig, ConfigError> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `MANIFEST_API_BASE_URL`, `MANIFEST_API_USERNAME`, and
/// `MANIFEST_API_PASSWORD` must be present; the remaining variables fall
/// back to their defaults.
///
/// # Errors
/// Returns [`ConfigError`] if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<ClientConfig, ConfigError> {
    let base_url = env_var("MANIFEST_API_BASE_URL")?;
    let username = env_var("MANIFEST_API_USERNAME")?;
    let password = env_var("MANIFEST_API_PASSWORD")?;
    let accept_invalid_certs = env_bool("MANIFEST_ACCEPT_INVALID_CERTS", false);

    let request_timeout_secs =
        env_u64("MANIFEST_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let sync_timeout_secs = env_u64("MANIFEST_SYNC_TIMEOUT_SECS", DEFAULT_SYNC_TIMEOUT_SECS)?;
    let poll_interval_secs = env_u64("MANIFEST_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
    let wait_timeout_secs = env_u64("MANIFEST_WAIT_TIMEOUT_SECS", DEFAULT_WAIT_TIMEOUT_SECS)?;

    Ok(ClientConfig {
        base_url,
        username,
        password,
        accept_invalid_certs,
        request_timeout_secs,
        sync_timeout_secs,
        poll_interval_secs,
        wait_timeout_secs,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns [`ConfigError`] if the file is missing, no candidate file is
/// found, or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConfigError("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConfigError(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError(format!("Invalid JSON format: {}", e))),
        _ => Err(ConfigError(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent levels, and the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("manifest.json"),
            cwd.join("manifest.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("manifest.json"),
                exe_dir.join("manifest.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .map_err(|_| ConfigError(format!("Missing required environment variable: {}", key)))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

/// Parse an optional numeric environment variable, falling back to `default`
/// when unset.
fn env_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => {
            raw.parse::<u64>().map_err(|e| ConfigError(format!("Invalid value for {}: {}", key, e)))
        }
        Err(_) => Ok(default),
    }
}
