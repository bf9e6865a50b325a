//! TOML-based user settings.
//!
//! Stores user preferences including:
//! - Which branded variant to run (`app_id` or a custom `variant_path`)
//! - Freeze cap and recharge interval
//! - Milestone re-fire policy
//! - How long a deleted journal entry can be restored
//! - Debounce gap for irreversible actions
//!
//! Settings are stored at `~/.config/rewire/settings.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::config::variants::DEFAULT_ID;
use crate::error::ConfigError;
use crate::journal::DEFAULT_TTL_SECS;
use crate::milestone::SeenPolicy;

/// Freeze token configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeSettings {
    #[serde(default = "default_freeze_cap")]
    pub cap: u32,
    #[serde(default = "default_recharge_days")]
    pub recharge_days: u32,
}

/// Milestone celebration configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSettings {
    #[serde(default)]
    pub policy: SeenPolicy,
}

/// Journal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Seconds after a delete during which `journal undo` still works.
    #[serde(default = "default_undo_ttl_secs")]
    pub undo_ttl_secs: u64,
}

/// User settings.
///
/// Serialized to/from TOML at `~/.config/rewire/settings.toml`. Scalar
/// fields come before the nested tables so the TOML encoder can emit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Path to a TOML variant file, overriding `app_id`.
    #[serde(default)]
    pub variant_path: Option<String>,
    /// Minimum gap between two irreversible actions.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub freeze: FreezeSettings,
    #[serde(default)]
    pub milestones: MilestoneSettings,
    #[serde(default)]
    pub journal: JournalSettings,
}

fn default_app_id() -> String {
    DEFAULT_ID.into()
}
fn default_debounce_ms() -> u64 {
    600
}
fn default_freeze_cap() -> u32 {
    2
}
fn default_recharge_days() -> u32 {
    7
}
fn default_undo_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS as u64
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            undo_ttl_secs: default_undo_ttl_secs(),
        }
    }
}

impl Default for FreezeSettings {
    fn default() -> Self {
        Self {
            cap: default_freeze_cap(),
            recharge_days: default_recharge_days(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            variant_path: None,
            debounce_ms: default_debounce_ms(),
            freeze: FreezeSettings::default(),
            milestones: MilestoneSettings::default(),
            journal: JournalSettings::default(),
        }
    }
}

/// Dot-separated settings key as a JSON pointer (`freeze.cap` -> `/freeze/cap`).
fn pointer(key: &str) -> Option<String> {
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return None;
    }
    Some(format!("/{}", key.replace('.', "/")))
}

/// Parse `raw` into the JSON type already held by `current`.
fn coerce(current: &serde_json::Value, raw: &str) -> Result<serde_json::Value, String> {
    use serde_json::Value;

    match current {
        Value::Bool(_) => raw.parse::<bool>().map(Value::Bool).map_err(|e| e.to_string()),
        Value::Number(_) => raw
            .parse::<u64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .map_err(|_| format!("cannot parse '{raw}' as number")),
        Value::Object(_) | Value::Array(_) => serde_json::from_str(raw).map_err(|e| e.to_string()),
        // An empty value clears an optional string.
        Value::Null | Value::String(_) if raw.is_empty() => Ok(Value::Null),
        _ => Ok(Value::String(raw.to_string())),
    }
}

impl Settings {
    /// Default settings file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/rewire"),
            message: e.to_string(),
        })?;
        Ok(dir.join("settings.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed,
    /// or if the default settings cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load settings, using defaults: {}", e);
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.pointer(&pointer(key)?)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key. The caller decides when to save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type (including unknown enum names such as a bad policy).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let slot = pointer(key)
            .and_then(|p| json.pointer_mut(&p))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let coerced = coerce(slot, value).map_err(invalid)?;
        *slot = coerced;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// The variant id to run. `REWIRE_APP_ID` overrides the stored value.
    pub fn effective_app_id(&self) -> String {
        match std::env::var("REWIRE_APP_ID") {
            Ok(id) if !id.trim().is_empty() => id,
            _ => self.app_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Settings = toml::from_str("").unwrap();
        assert_eq!(parsed.app_id, "rewire");
        assert_eq!(parsed.debounce_ms, 600);
        assert_eq!(parsed.freeze.cap, 2);
        assert_eq!(parsed.freeze.recharge_days, 7);
        assert_eq!(parsed.milestones.policy, SeenPolicy::Lifetime);
        assert_eq!(parsed.journal.undo_ttl_secs, 5);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("freeze.cap").as_deref(), Some("2"));
        assert_eq!(settings.get("milestones.policy").as_deref(), Some("lifetime"));
        assert_eq!(settings.get("app_id").as_deref(), Some("rewire"));
        assert!(settings.get("freeze.missing").is_none());
    }

    #[test]
    fn set_updates_nested_number_and_enum() {
        let mut settings = Settings::default();
        settings.set("freeze.cap", "4").unwrap();
        settings.set("milestones.policy", "per_run").unwrap();
        settings.set("journal.undo_ttl_secs", "120").unwrap();
        assert_eq!(settings.freeze.cap, 4);
        assert_eq!(settings.journal.undo_ttl_secs, 120);
        assert_eq!(settings.milestones.policy, SeenPolicy::PerRun);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut settings = Settings::default();
        for key in ["freeze.nonexistent", "", "freeze.", ".cap", "debounce_ms.inner"] {
            assert!(
                matches!(settings.set(key, "1"), Err(ConfigError::UnknownKey(_))),
                "{key}"
            );
        }
    }

    #[test]
    fn set_rejects_invalid_type_and_unknown_policy() {
        let mut settings = Settings::default();
        assert!(settings.set("debounce_ms", "soon").is_err());
        assert!(settings.set("milestones.policy", "sometimes").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn optional_path_can_be_set_and_cleared() {
        let mut settings = Settings::default();
        settings.set("variant_path", "/tmp/custom.toml").unwrap();
        assert_eq!(settings.variant_path.as_deref(), Some("/tmp/custom.toml"));
        settings.set("variant_path", "").unwrap();
        assert!(settings.variant_path.is_none());
    }

    #[test]
    fn required_string_cannot_be_cleared() {
        let mut settings = Settings::default();
        assert!(settings.set("app_id", "").is_err());
        assert_eq!(settings.app_id, "rewire");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "freeze = [[[").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
