use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// The backend's default listen address
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the bot backend; endpoint paths are appended to it
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Periodic status check in seconds, 0 disables it
    #[serde(default)]
    pub status_refresh_secs: u64,

    /// Directory for log files; defaults to `<data dir>/logs`
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            status_refresh_secs: 0,
            log_dir: None,
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Config {
    pub fn status_refresh(&self) -> Option<Duration> {
        refresh_interval(self.status_refresh_secs)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("logs")))
    }
}

pub fn refresh_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the config from the default location
pub fn load() -> Result<Config, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    load_from(&path)
}

/// Read `path`; a missing file yields the defaults
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BOTDASH_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("botdash").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("botdash").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "botdash", "botdash")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("botdash"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("botdash"));
    }
    directories::ProjectDirs::from("io", "botdash", "botdash")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Add a scheme if missing and drop trailing slashes
pub fn normalize_api_base(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_base() {
        assert_eq!(normalize_api_base("localhost:8000"), "http://localhost:8000");
        assert_eq!(
            normalize_api_base(" https://bot.example.com/ "),
            "https://bot.example.com"
        );
        assert_eq!(normalize_api_base(""), DEFAULT_API_BASE);
    }

    #[test]
    fn test_refresh_interval_zero_disables() {
        assert_eq!(refresh_interval(0), None);
        assert_eq!(refresh_interval(15), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let config = Config {
            log_dir: Some("/var/log/botdash".to_string()),
            ..Config::default()
        };
        assert_eq!(config.log_dir(), Some(PathBuf::from("/var/log/botdash")));
    }
}
