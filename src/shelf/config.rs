use crate::error::Result;
use crate::model::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Client configuration, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Identity used for invocations when none is given on the command line
    #[serde(default)]
    pub caller: Option<Address>,

    /// Default tracing filter when `SHELF_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            caller: None,
            log_level: default_log_level(),
        }
    }
}

impl ShelfConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ShelfConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["caller", "log-level"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "caller" => Some(
                self.caller
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "caller" => {
                let caller = Address::new(value).map_err(|e| e.to_string())?;
                self.caller = Some(caller);
                Ok(())
            }
            "log-level" => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!(
                        "Invalid log level {:?}: expected one of {}",
                        value,
                        LOG_LEVELS.join(", ")
                    ));
                }
                self.log_level = level;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShelfConfig::default();
        assert_eq!(config.caller, None);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShelfConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, ShelfConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = ShelfConfig::default();
        config.set("caller", "alice").unwrap();
        config.set("log-level", "DEBUG").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = ShelfConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.get("caller").as_deref(), Some("alice"));
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"caller":"bob"}"#).unwrap();

        let loaded = ShelfConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.caller, Some(Address::new("bob").unwrap()));
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ShelfConfig::default();
        assert!(config.set("caller", "two words").is_err());
        assert!(config.set("log-level", "loud").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, ShelfConfig::default());
    }
}
