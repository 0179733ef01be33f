//! Configuration loader
//!
//! Loads adapter configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If that fails (e.g. no `OBSCREEN_API_KEY`), falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `OBSCREEN_API_KEY`: User API key (required)
//! - `OBSCREEN_INSTANCE_URL`: Instance base URL
//! - `OBSCREEN_TIMEOUT_SECS`: Request timeout in seconds
//! - `OBSCREEN_ACCEPT_INVALID_CERTS`: Skip TLS verification (true/false)
//! - `OBSCREEN_CONTINUE_ON_FAIL`: Emit error records instead of aborting
//! - `OBSCREEN_USER_AGENT`: Custom `User-Agent` header
//!
//! ## File Locations
//! The loader probes `obscreen.{toml,json}` then `config.{toml,json}` in the
//! current directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};

use obscreen_domain::constants::DEFAULT_TIMEOUT_SECS;
use obscreen_domain::{AdapterConfig, ObscreenError, Result};

pub const ENV_API_KEY: &str = "OBSCREEN_API_KEY";
pub const ENV_INSTANCE_URL: &str = "OBSCREEN_INSTANCE_URL";
pub const ENV_TIMEOUT_SECS: &str = "OBSCREEN_TIMEOUT_SECS";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "OBSCREEN_ACCEPT_INVALID_CERTS";
pub const ENV_CONTINUE_ON_FAIL: &str = "OBSCREEN_CONTINUE_ON_FAIL";
pub const ENV_USER_AGENT: &str = "OBSCREEN_USER_AGENT";

const FILE_STEMS: [&str; 2] = ["obscreen", "config"];
const FILE_EXTENSIONS: [&str; 2] = ["toml", "json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ObscreenError::Config` if neither source yields a configuration
/// or the file found is invalid.
pub fn load() -> Result<AdapterConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only the API key is required; everything else falls back to defaults.
///
/// # Errors
/// Returns `ObscreenError::Config` if the key is missing or a value cannot be
/// parsed.
pub fn load_from_env() -> Result<AdapterConfig> {
    let api_key = env_var(ENV_API_KEY)?;
    let mut config = match std::env::var(ENV_INSTANCE_URL) {
        Ok(url) if !url.trim().is_empty() => AdapterConfig::new(url.trim(), api_key),
        _ => AdapterConfig { api_key, ..default_config() },
    };

    config.timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            ObscreenError::config(format!("Invalid {ENV_TIMEOUT_SECS} `{raw}`: {e}"))
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };
    config.accept_invalid_certs = env_bool(ENV_ACCEPT_INVALID_CERTS, false);
    config.continue_on_fail = env_bool(ENV_CONTINUE_ON_FAIL, false);
    config.user_agent = std::env::var(ENV_USER_AGENT).ok().filter(|agent| !agent.is_empty());

    Ok(config)
}

fn default_config() -> AdapterConfig {
    AdapterConfig::new(obscreen_domain::constants::DEFAULT_INSTANCE_URL, String::new())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `ObscreenError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid or `api_key` is missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<AdapterConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ObscreenError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ObscreenError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ObscreenError::config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AdapterConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ObscreenError::config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ObscreenError::config(format!("Invalid JSON format: {e}"))),
        _ => Err(ObscreenError::config(format!("Unsupported config format: {extension}"))),
    }
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    ["", "..", "../.."]
        .iter()
        .flat_map(|up| {
            FILE_STEMS.iter().flat_map(move |stem| {
                FILE_EXTENSIONS.iter().map(move |ext| dir.join(up).join(format!("{stem}.{ext}")))
            })
        })
        .collect()
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ObscreenError::config(format!("Missing required environment variable: {key}")))
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
