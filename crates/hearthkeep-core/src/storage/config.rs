//! TOML-based application configuration.
//!
//! Stores:
//! - Classifier thresholds used by reminders and listings
//! - Reminder scheduling
//! - Assistant endpoint, model and temperature
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::reminders::ReminderPolicy;
use crate::thresholds::{LOW_ITEM_THRESHOLD_DAYS, UPCOMING_BILL_WINDOW_DAYS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_low_item_days")]
    pub low_item_days: f64,
    #[serde(default = "default_upcoming_bill_days")]
    pub upcoming_bill_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

// Default functions
fn default_low_item_days() -> f64 {
    LOW_ITEM_THRESHOLD_DAYS
}
fn default_upcoming_bill_days() -> i64 {
    UPCOMING_BILL_WINDOW_DAYS
}
fn default_true() -> bool {
    true
}
fn default_interval_hours() -> u64 {
    24
}
fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f64 {
    0.4
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            low_item_days: default_low_item_days(),
            upcoming_bill_days: default_upcoming_bill_days(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: default_interval_hours(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults only if no file exists.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the rest of the crate cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if !(self.thresholds.low_item_days.is_finite() && self.thresholds.low_item_days > 0.0) {
            return Err(invalid("thresholds.low_item_days", "must be a positive number".into()));
        }
        if self.thresholds.upcoming_bill_days < 0 {
            return Err(invalid("thresholds.upcoming_bill_days", "must not be negative".into()));
        }
        if self.reminders.interval_hours == 0 {
            return Err(invalid("reminders.interval_hours", "must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(invalid("assistant.temperature", "must be between 0 and 2".into()));
        }
        url::Url::parse(&self.assistant.endpoint)
            .map_err(|e| invalid("assistant.endpoint", e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key in memory, validating the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// [`Config::apply`] followed by [`Config::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value is invalid,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Reminder thresholds derived from this config.
    pub fn reminder_policy(&self) -> ReminderPolicy {
        ReminderPolicy {
            low_item_days: self.thresholds.low_item_days,
            upcoming_bill_days: self.thresholds.upcoming_bill_days,
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.thresholds.low_item_days, 3.0);
        assert_eq!(cfg.thresholds.upcoming_bill_days, 7);
        assert!(cfg.reminders.enabled);
        assert_eq!(cfg.reminders.interval_hours, 24);
        assert_eq!(cfg.assistant.model, "gpt-4o-mini");
        assert_eq!(cfg.assistant.temperature, 0.4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[assistant]\nmodel = \"gpt-4o\"\n").unwrap();
        assert_eq!(cfg.assistant.model, "gpt-4o");
        assert_eq!(cfg.assistant.temperature, 0.4);
        assert_eq!(cfg.thresholds.upcoming_bill_days, 7);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("reminders.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("thresholds.upcoming_bill_days").as_deref(), Some("7"));
        assert_eq!(cfg.get("assistant.model").as_deref(), Some("gpt-4o-mini"));
        assert!(cfg.get("assistant.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("reminders.enabled", "false").unwrap();
        cfg.apply("thresholds.low_item_days", "4.5").unwrap();
        cfg.apply("thresholds.upcoming_bill_days", "14").unwrap();
        cfg.apply("assistant.model", "gpt-4o").unwrap();
        assert!(!cfg.reminders.enabled);
        assert_eq!(cfg.thresholds.low_item_days, 4.5);
        assert_eq!(cfg.reminder_policy().upcoming_bill_days, 14);
        assert_eq!(cfg.assistant.model, "gpt-4o");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.apply("ui.nonexistent_key", "value").is_err());
        assert!(cfg.apply("", "value").is_err());
    }

    #[test]
    fn apply_rejects_invalid_values_without_mutating() {
        let mut cfg = Config::default();
        assert!(cfg.apply("reminders.enabled", "not_a_bool").is_err());
        assert!(cfg.apply("assistant.temperature", "3.5").is_err());
        assert!(cfg.apply("assistant.endpoint", "not a url").is_err());
        assert!(cfg.apply("thresholds.upcoming_bill_days", "-2").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.apply("reminders.interval_hours", "12").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().reminders.interval_hours, 12);
    }

    #[test]
    fn load_from_rejects_broken_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds\nlow_item_days = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn unreadable_file_is_an_error_and_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let garbage = [0xff, 0xfe, b'\n', 0x80];
        std::fs::write(&path, garbage).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })), "{err}");
        assert_eq!(std::fs::read(&path).unwrap(), garbage);
    }

    #[test]
    fn directory_at_config_path_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
        assert!(path.is_dir());
    }
}
