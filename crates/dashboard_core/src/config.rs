use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info, warn};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CONFIG_FILE: &str = "vedabyte.toml";
pub const CONFIG_PATH_ENV: &str = "VEDABYTE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub fetch_benchmark_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            request_timeout_secs: None,
            fetch_benchmark_on_start: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    backend_url: Option<String>,
    request_timeout_secs: Option<u64>,
    fetch_benchmark_on_start: Option<bool>,
}

/// Defaults, then `vedabyte.toml` (or `$VEDABYTE_CONFIG`), then environment.
pub fn load_settings() -> Settings {
    load_settings_from(None)
}

/// Same as [`load_settings`] with an explicit config file path.
///
/// A missing file is only worth a warning when the caller asked for it.
pub fn load_settings_from(explicit_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let (path, explicit) = match explicit_path {
        Some(path) => (path.to_path_buf(), true),
        None => match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        },
    };

    match fs::read_to_string(&path) {
        Ok(raw) => match apply_file_settings(&mut settings, &raw) {
            Ok(()) => info!(path = %path.display(), "loaded dashboard config file"),
            Err(err) => warn!(path = %path.display(), "ignoring unparsable config file: {err}"),
        },
        Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
            debug!(path = %path.display(), "no config file; using defaults");
        }
        Err(err) => warn!(path = %path.display(), "failed to read config file: {err}"),
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file_settings(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.fetch_benchmark_on_start {
        settings.fetch_benchmark_on_start = v;
    }
    Ok(())
}

/// Overlays environment variables read through `lookup`.
///
/// `APP__*` names win over the shorter aliases when both are set.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("VEDABYTE_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = lookup("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(0) => settings.request_timeout_secs = None,
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = lookup("APP__FETCH_BENCHMARK_ON_START") {
        match parse_flag(&v) {
            Some(flag) => settings.fetch_benchmark_on_start = flag,
            None => warn!(value = %v, "ignoring invalid APP__FETCH_BENCHMARK_ON_START"),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
