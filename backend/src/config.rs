use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::history::CollisionPolicy;

pub const CONFIG_PATH_VAR: &str = "IKANCHECK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/ikancheck.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub history_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub frontend_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub history_collision: CollisionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            model_path: PathBuf::from("model/model999.onnx"),
            history_dir: PathBuf::from("riwayat_upload"),
            assets_dir: PathBuf::from("assets"),
            frontend_dir: PathBuf::from("frontend/dist"),
            max_upload_bytes: 10 * 1024 * 1024,
            history_collision: CollisionPolicy::Overwrite,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl AppConfig {
    /// Defaults, then the YAML file (if any), then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(config_str: &str) -> Result<Self, ConfigError> {
        if config_str.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(config_str)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = parse_value("PORT", &port)?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("HISTORY_DIR") {
            self.history_dir = PathBuf::from(path);
        }
        if let Some(path) = lookup("ASSETS_DIR") {
            self.assets_dir = PathBuf::from(path);
        }
        if let Some(path) = lookup("FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(path);
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = parse_value("MAX_UPLOAD_BYTES", &limit)?;
        }
        if let Some(policy) = lookup("HISTORY_COLLISION") {
            self.history_collision =
                policy
                    .parse()
                    .map_err(|reason| ConfigError::InvalidValue {
                        key: "HISTORY_COLLISION",
                        value: policy.clone(),
                        reason,
                    })?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let config = AppConfig::from_yaml_str(
            "port: 9000\nhistory_dir: /tmp/history\nhistory_collision: sequence\n",
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.history_dir, PathBuf::from("/tmp/history"));
        assert_eq!(config.history_collision, CollisionPolicy::Sequence);
        assert_eq!(config.model_path, AppConfig::default().model_path);
    }

    #[test]
    fn yaml_rejects_unknown_policy() {
        assert!(matches!(
            AppConfig::from_yaml_str("history_collision: sometimes\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn environment_wins_over_file() {
        let mut config = AppConfig::from_yaml_str("port: 9000\n").unwrap();
        config
            .apply_env(env_of(&[
                ("PORT", "8181"),
                ("MODEL_PATH", "models/fish.onnx"),
                ("HISTORY_COLLISION", "Sequence"),
                ("MAX_UPLOAD_BYTES", "1024"),
            ]))
            .unwrap();
        assert_eq!(config.port, 8181);
        assert_eq!(config.model_path, PathBuf::from("models/fish.onnx"));
        assert_eq!(config.history_collision, CollisionPolicy::Sequence);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.bind_address(), "0.0.0.0:8181");
    }

    #[test]
    fn invalid_environment_values_are_errors() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env_of(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err = config
            .apply_env(env_of(&[("HISTORY_COLLISION", "never")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "HISTORY_COLLISION", .. }
        ));
    }
}
