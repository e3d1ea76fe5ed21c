//! TOML-based ring configuration.
//!
//! Stores the settings the scheduling core reads:
//! - the ring's zero position
//! - minimum task duration, overlap tolerance and free-slot scan quantum
//!
//! Configuration is stored at `~/.config/ringtime/config.toml`. The
//! selected date is session state and is never persisted.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::ring::{RingConfig, RingRules, MINUTES_PER_DAY};

/// Ring presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSection {
    /// Degrees in `[0, 360)` by which 00:00 is rotated on screen.
    #[serde(default)]
    pub zero_position: f64,
}

/// Scheduling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesSection {
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: u32,
    #[serde(default = "default_overlap_tolerance_secs")]
    pub overlap_tolerance_secs: u32,
    #[serde(default = "default_slot_quantum_minutes")]
    pub slot_quantum_minutes: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ringtime/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ring: RingSection,
    #[serde(default)]
    pub rules: RulesSection,
}

fn default_min_duration_minutes() -> u32 {
    5
}
fn default_overlap_tolerance_secs() -> u32 {
    30
}
fn default_slot_quantum_minutes() -> u32 {
    15
}

impl Default for RingSection {
    fn default() -> Self {
        Self { zero_position: 0.0 }
    }
}

impl Default for RulesSection {
    fn default() -> Self {
        Self {
            min_duration_minutes: default_min_duration_minutes(),
            overlap_tolerance_secs: default_overlap_tolerance_secs(),
            slot_quantum_minutes: default_slot_quantum_minutes(),
        }
    }
}

/// Returns `~/.config/ringtime[-dev]/` based on RINGTIME_ENV.
///
/// Set RINGTIME_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RINGTIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ringtime-dev")
    } else {
        base_dir.join("ringtime")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
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
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        debug!(path = %path.display(), "loaded ring config");
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every value against the ranges the scheduling core supports.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        };

        if !(0.0..360.0).contains(&self.ring.zero_position) {
            return invalid("ring.zero_position", "must be in [0, 360)");
        }
        if self.rules.min_duration_minutes == 0 {
            return invalid("rules.min_duration_minutes", "must be at least 1");
        }
        let quantum = i64::from(self.rules.slot_quantum_minutes);
        if quantum == 0 || quantum > MINUTES_PER_DAY {
            return invalid("rules.slot_quantum_minutes", "must be in 1..=1440");
        }
        let min_duration_secs = i64::from(self.rules.min_duration_minutes) * 60;
        if i64::from(self.rules.overlap_tolerance_secs) >= min_duration_secs {
            return invalid(
                "rules.overlap_tolerance_secs",
                "must be shorter than the minimum duration",
            );
        }
        Ok(())
    }

    pub fn rules(&self) -> RingRules {
        RingRules {
            min_duration: Duration::minutes(i64::from(self.rules.min_duration_minutes)),
            overlap_tolerance: Duration::seconds(i64::from(self.rules.overlap_tolerance_secs)),
            slot_quantum: Duration::minutes(i64::from(self.rules.slot_quantum_minutes)),
        }
    }

    /// Ring configuration for `selected_date`.
    pub fn ring_config(&self, selected_date: NaiveDate) -> RingConfig {
        RingConfig::new(self.ring.zero_position, selected_date)
    }
}
