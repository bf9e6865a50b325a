//! Branded app configuration.
//!
//! One [`AppConfig`] describes a variant: its phases, milestones, goal and
//! copy. The engine never branches on the variant id; everything it needs
//! flows through this record. Variants are either compiled in (see
//! [`variants`]) or loaded from a TOML file.

pub mod variants;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::storage::Settings;

/// A named stage selected purely by elapsed days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Exclusive upper bound: the phase applies while `days < max_day`.
    pub max_day: u32,
    pub label: String,
    #[serde(default)]
    pub color: String,
}

/// A single day-threshold achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub day: u32,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub message: String,
}

/// A recovery fact shown once the streak reaches `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub day: u32,
    pub title: String,
    pub description: String,
}

/// Configuration for one branded variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage namespace and lookup key (e.g. "rewire").
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    /// Ascending by `max_day`; the last entry is the terminal phase.
    pub phases: Vec<Phase>,
    /// Ascending by `day`.
    pub milestones: Vec<Milestone>,
    /// Target streak length. Zero or negative yields 0% progress.
    #[serde(default)]
    pub goal_days: i64,
    #[serde(default)]
    pub recovery_timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub default_daily_cost: Option<f64>,
    #[serde(default)]
    pub cost_label: Option<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub weekly_messages: Vec<String>,
    #[serde(default)]
    pub journal_prompts: Vec<String>,
}

fn default_unit_label() -> String {
    "days".into()
}

impl AppConfig {
    /// Look up a compiled-in variant.
    pub fn builtin(id: &str) -> Option<Self> {
        variants::all().into_iter().find(|c| c.id == id)
    }

    /// Parse and validate a variant from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a variant from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the variant selected by the user's settings.
    ///
    /// A `variant_path` wins over `app_id`. An unknown `app_id` falls back to
    /// the default variant rather than failing.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        if let Some(path) = settings.variant_path.as_deref() {
            return Self::load(Path::new(path));
        }
        let id = settings.effective_app_id();
        match Self::builtin(&id) {
            Some(cfg) => Ok(cfg),
            None => {
                tracing::warn!("unknown app variant '{}', using '{}'", id, variants::DEFAULT_ID);
                Ok(variants::rewire())
            }
        }
    }

    /// Check the ordering invariants the evaluator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty id, no phases,
    /// or phases/milestones that are not strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.phases.is_empty() {
            return Err(invalid("phases", "at least one phase is required"));
        }
        if !self.phases.windows(2).all(|w| w[0].max_day < w[1].max_day) {
            return Err(invalid("phases", "max_day values must be strictly ascending"));
        }
        if !self.milestones.windows(2).all(|w| w[0].day < w[1].day) {
            return Err(invalid("milestones", "day values must be strictly ascending"));
        }
        if let Some(cost) = self.default_daily_cost {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(invalid("default_daily_cost", "must be a positive amount"));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        variants::rewire()
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        id = "coldturkey"
        name = "Cold Turkey"
        goal_days = 30

        [[phases]]
        max_day = 7
        label = "Detox"

        [[phases]]
        max_day = 30
        label = "Rebuild"

        [[milestones]]
        day = 1
        label = "Day 1"

        [[milestones]]
        day = 7
        label = "1 Week"
    "#;

    #[test]
    fn parses_minimal_variant_with_defaults() {
        let cfg = AppConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(cfg.id, "coldturkey");
        assert_eq!(cfg.unit_label, "days");
        assert_eq!(cfg.phases.len(), 2);
        assert!(cfg.quotes.is_empty());
        assert!(cfg.default_daily_cost.is_none());
    }

    #[test]
    fn rejects_descending_milestones() {
        let mut cfg = AppConfig::from_toml_str(MINIMAL).unwrap();
        cfg.milestones.reverse();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "milestones"
        ));
    }

    #[test]
    fn rejects_missing_phases() {
        let mut cfg = AppConfig::from_toml_str(MINIMAL).unwrap();
        cfg.phases.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tolerates_non_positive_goal() {
        let mut cfg = AppConfig::from_toml_str(MINIMAL).unwrap();
        cfg.goal_days = 0;
        assert!(cfg.validate().is_ok());
        cfg.goal_days = -5;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unparseable_toml_is_parse_error() {
        let result = AppConfig::from_toml_str("id = ");
        assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn unknown_app_id_falls_back_to_default() {
        let settings = Settings {
            app_id: "does-not-exist".into(),
            ..Settings::default()
        };
        let cfg = AppConfig::from_settings(&settings).unwrap();
        assert_eq!(cfg.id, variants::DEFAULT_ID);
    }

    #[test]
    fn variant_path_overrides_app_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variant.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let settings = Settings {
            app_id: "sober".into(),
            variant_path: Some(path.to_string_lossy().into_owned()),
            ..Settings::default()
        };
        let cfg = AppConfig::from_settings(&settings).unwrap();
        assert_eq!(cfg.id, "coldturkey");
    }
}
