use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_reference_table_path() -> PathBuf {
    PathBuf::from("data/car-info.json")
}

fn default_notification_ttl_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_reference_table_path")]
    pub reference_table_path: PathBuf,
    #[serde(default = "default_notification_ttl_seconds")]
    pub notification_ttl_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_table_path: default_reference_table_path(),
            notification_ttl_seconds: default_notification_ttl_seconds(),
        }
    }
}

impl AppConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_seconds)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.reference_table_path, PathBuf::from("data/car-info.json"));
        assert_eq!(cfg.notification_ttl(), Duration::from_secs(10));
    }

    #[test]
    fn explicit_values_win() {
        let cfg = parse_config(
            r#"{"reference_table_path": "/tmp/cars.json", "notification_ttl_seconds": 3}"#,
        )
        .unwrap();
        assert_eq!(cfg.reference_table_path, PathBuf::from("/tmp/cars.json"));
        assert_eq!(cfg.notification_ttl_seconds, 3);
    }

    #[test]
    fn shipped_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.json");
        assert!(load_config(path).is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
