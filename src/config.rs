//! Application configuration.
//! Keys are read from `drillcost.toml` in the working directory when present,
//! then from the environment, then fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_API_URL: &str = "DRILLCOST_API_URL";
pub const ENV_TIMEOUT_MS: &str = "DRILLCOST_TIMEOUT_MS";
pub const ENV_EXPORT_DIR: &str = "DRILLCOST_EXPORT_DIR";

pub const DEFAULT_CONFIG_FILE_NAME: &str = "drillcost.toml";
pub const DEFAULT_API_URL: &str = "https://g6w379cl-8000.inc1.devtunnels.ms/api";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty config value: {key}")]
    Empty { key: &'static str },
    #[error("invalid timeout value: {value}")]
    InvalidTimeout { value: String },
    #[error("read config file failed ({path}): {message}")]
    ReadConfigFile { path: String, message: String },
    #[error("parse config file failed ({path}): {message}")]
    ParseConfigFile { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the cost service, without trailing slash.
    pub api_base_url: String,
    /// Request timeout; `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    /// Where exported chart images are written.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: None,
            export_dir: std::env::temp_dir(),
        }
    }
}

impl AppConfig {
    pub fn from_default_sources() -> Result<Self, ConfigError> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::from_config_file(config_path);
        }
        Self::from_env()
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::ReadConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let value: toml::Value =
            toml::from_str(&content).map_err(|err| ConfigError::ParseConfigFile {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        let table = value
            .as_table()
            .ok_or_else(|| ConfigError::ParseConfigFile {
                path: path.display().to_string(),
                message: "root is not a TOML table".to_string(),
            })?;

        Self::from_env_with(|key| {
            table
                .get(key)
                .and_then(toml_value_to_string)
                .or_else(|| std::env::var(key).ok())
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    fn from_env_with<F>(mut getter: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = match getter(ENV_API_URL) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Empty { key: ENV_API_URL })
            }
            Some(value) => value.trim().trim_end_matches('/').to_string(),
            None => defaults.api_base_url,
        };
        let timeout_ms = match getter(ENV_TIMEOUT_MS) {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value })?,
            ),
            None => None,
        };
        let export_dir = getter(ENV_EXPORT_DIR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        Ok(Self {
            api_base_url,
            timeout_ms,
            export_dir,
        })
    }
}

fn toml_value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(value) => Some(value.clone()),
        toml::Value::Integer(value) => Some(value.to_string()),
        toml::Value::Float(value) => Some(value.to_string()),
        toml::Value::Boolean(value) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_env_with(|_| None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.export_dir, std::env::temp_dir());
    }

    #[test]
    fn reads_overrides_and_trims_trailing_slash() {
        let mut vars = BTreeMap::new();
        vars.insert(ENV_API_URL, "http://localhost:8000/api/".to_string());
        vars.insert(ENV_TIMEOUT_MS, "2500".to_string());
        vars.insert(ENV_EXPORT_DIR, "/srv/charts".to_string());

        let config = AppConfig::from_env_with(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_ms, Some(2500));
        assert_eq!(config.export_dir, PathBuf::from("/srv/charts"));
    }

    #[test]
    fn rejects_blank_url_and_bad_timeout() {
        let err = AppConfig::from_env_with(|key| {
            (key == ENV_API_URL).then(|| "   ".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::Empty { key: ENV_API_URL });

        let err = AppConfig::from_env_with(|key| {
            (key == ENV_TIMEOUT_MS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn reads_from_config_file() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path_buf = std::env::temp_dir().join(format!("drillcost-config-{unique}.toml"));
        let content = r#"
DRILLCOST_API_URL = "https://costs.example.com/api"
DRILLCOST_TIMEOUT_MS = 4567
"#;
        std::fs::write(&path_buf, content).unwrap();

        let config = AppConfig::from_config_file(&path_buf).unwrap();
        std::fs::remove_file(&path_buf).ok();

        assert_eq!(config.api_base_url, "https://costs.example.com/api");
        assert_eq!(config.timeout_ms, Some(4567));
    }
}
