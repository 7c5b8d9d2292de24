//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/calctree/calctree.toml`
//! 3. Local config: file passed with `--config` / `CALCTREE_CONFIG`
//! 4. Environment variables: `CALCTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::ExponentPolicy;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub negative_exponent: Option<ExponentPolicy>,
    pub labels: Option<bool>,
    pub tree: Option<bool>,
}

/// Unified configuration for calctree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Behavior of `^` with a negative exponent (default: reject)
    pub negative_exponent: ExponentPolicy,
    /// Prefix output lines with `original:` / `reduced:`
    pub labels: bool,
    /// Render both trees as box-drawing trees after the prefix lines
    pub tree: bool,
}

/// Get the XDG config directory for calctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "calctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("calctree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_policy(value: &str) -> Result<ExponentPolicy, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(ExponentPolicy::Reject),
        "one" => Ok(ExponentPolicy::One),
        other => Err(ApplicationError::Config {
            message: format!("negative_exponent must be 'reject' or 'one', got '{}'", other),
        }),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ApplicationError::Config {
            message: format!("{} must be a boolean, got '{}'", key, other),
        }),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            negative_exponent: overlay.negative_exponent.unwrap_or(self.negative_exponent),
            labels: overlay.labels.unwrap_or(self.labels),
            tree: overlay.tree.unwrap_or(self.tree),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; it must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit local config
        if let Some(path) = local {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply CALCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CALCTREE").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("negative_exponent") {
            settings.negative_exponent = parse_policy(&val)?;
        }
        if let Ok(val) = config.get_string("labels") {
            settings.labels = parse_flag("labels", &val)?;
        }
        if let Ok(val) = config.get_string("tree") {
            settings.tree = parse_flag("tree", &val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_rejects_negative_exponent() {
        let settings = Settings::default();
        assert_eq!(settings.negative_exponent, ExponentPolicy::Reject);
        assert!(!settings.labels);
        assert!(!settings.tree);
    }

    #[test]
    fn given_partial_overlay_when_merge_then_only_specified_fields_change() {
        let base = Settings {
            negative_exponent: ExponentPolicy::Reject,
            labels: true,
            tree: false,
        };
        let overlay = RawSettings {
            negative_exponent: Some(ExponentPolicy::One),
            labels: None,
            tree: Some(true),
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.negative_exponent, ExponentPolicy::One);
        assert!(result.labels, "labels not in overlay, base wins");
        assert!(result.tree);
    }

    #[test]
    fn given_policy_strings_when_parse_then_case_insensitive() {
        assert_eq!(parse_policy("ONE").unwrap(), ExponentPolicy::One);
        assert_eq!(parse_policy(" reject ").unwrap(), ExponentPolicy::Reject);
        assert!(parse_policy("zero").is_err());
    }

    #[test]
    fn given_flag_strings_when_parse_flag_then_booleans_or_config_error() {
        assert!(parse_flag("labels", "TRUE").unwrap());
        assert!(parse_flag("labels", "on").unwrap());
        assert!(!parse_flag("tree", " 0 ").unwrap());
        let err = parse_flag("tree", "yes-please").unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
        assert!(err.to_string().contains("tree must be a boolean"));
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_through_raw() {
        let settings = Settings {
            negative_exponent: ExponentPolicy::One,
            labels: true,
            tree: false,
        };
        let text = settings.to_toml().unwrap();
        assert!(text.contains("negative_exponent = \"one\""));
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
