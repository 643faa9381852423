//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fsutil/fsutil.toml` (or `--config <file>`)
//! 3. Environment variables: `FSUTIL_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_DEVICE_PREFIX;
use crate::exitcode;

/// How handler outcomes map to process exit codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExitCodePolicy {
    /// 0 on success, sysexits codes on failure
    #[default]
    Strict,
    /// 1 on every path, success included
    Legacy,
}

impl ExitCodePolicy {
    /// Resolve the code a handler would return under strict semantics.
    pub fn resolve(self, strict_code: i32) -> i32 {
        match self {
            ExitCodePolicy::Strict => strict_code,
            ExitCodePolicy::Legacy => exitcode::LEGACY,
        }
    }
}

impl FromStr for ExitCodePolicy {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ExitCodePolicy::Strict),
            "legacy" => Ok(ExitCodePolicy::Legacy),
            other => Err(ApplicationError::Config {
                message: format!("unknown exit_codes policy: {other} (expected strict|legacy)"),
            }),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub exit_codes: Option<ExitCodePolicy>,
    pub device_prefix: Option<String>,
}

/// Unified configuration for fsutil.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Exit-code policy (default: strict)
    pub exit_codes: ExitCodePolicy,
    /// Prefix prepended to volume designators (default: platform specific)
    pub device_prefix: Option<String>,
}

/// Get the XDG config directory for fsutil.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fsutil").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fsutil.toml"))
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Device prefix in effect: configured value or the platform default.
    pub fn device_prefix(&self) -> &str {
        self.device_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DEVICE_PREFIX)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            exit_codes: overlay.exit_codes.unwrap_or(self.exit_codes),
            device_prefix: overlay
                .device_prefix
                .clone()
                .or_else(|| self.device_prefix.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; replaces the global one and must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Settings::load`], reading `FSUTIL_*` variables from `env` instead
    /// of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file: explicit path must exist, global one is optional
        match config_file {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        let raw = load_raw_settings(&global_path)?;
                        current = current.merge_with(&raw);
                    }
                }
            }
        }

        // 3. Apply environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("FSUTIL")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("exit_codes") {
            settings.exit_codes = val.parse()?;
        }
        if let Ok(val) = config.get_string("device_prefix") {
            settings.device_prefix = Some(val);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_legacy_policy_when_resolving_then_always_one() {
        assert_eq!(ExitCodePolicy::Legacy.resolve(exitcode::OK), 1);
        assert_eq!(ExitCodePolicy::Legacy.resolve(exitcode::USAGE), 1);
        assert_eq!(ExitCodePolicy::Strict.resolve(exitcode::NOINPUT), 66);
    }

    #[test]
    fn given_policy_strings_when_parsing_then_case_insensitive() {
        assert_eq!("LEGACY".parse::<ExitCodePolicy>().unwrap(), ExitCodePolicy::Legacy);
        assert_eq!(" strict".parse::<ExitCodePolicy>().unwrap(), ExitCodePolicy::Strict);
        assert!("lenient".parse::<ExitCodePolicy>().is_err());
    }

    #[test]
    fn given_no_prefix_when_resolving_then_platform_default() {
        assert_eq!(Settings::default().device_prefix(), DEFAULT_DEVICE_PREFIX);
    }
}
