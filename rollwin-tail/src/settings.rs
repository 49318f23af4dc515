use std::env::{self, VarError};
use std::fs;

use rollwin_core::WeightPolicy;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SettingsError;

pub const CONFIG_ENV: &str = "ROLLWIN_CONFIG";

const DEFAULT_SETTINGS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../",
    "configs/default.toml"
));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    /// Negative values read as 0; the window raises anything below 2 to 2.
    #[serde(deserialize_with = "non_negative")]
    pub capacity: usize,
    #[serde(default)]
    pub weight: WeightPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub window: Window,
    pub report: Report,
}

impl Settings {
    /// Loads the file named by `ROLLWIN_CONFIG`, or the bundled defaults.
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_env_value(env::var(CONFIG_ENV))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, SettingsError> {
        match value {
            Ok(path) => Self::from_path(&path),
            Err(VarError::NotPresent) => Self::from_toml(DEFAULT_SETTINGS),
            Err(source) => Err(SettingsError::Env {
                name: CONFIG_ENV,
                source,
            }),
        }
    }

    pub fn from_path(path: &str) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}

fn non_negative<'de, D>(deserializer: D) -> Result<usize, D::Error>
    where
        D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::from_toml(DEFAULT_SETTINGS).unwrap();

        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.window.capacity, 60);
        assert_eq!(settings.window.weight, WeightPolicy::Positional);
        assert_eq!(settings.report.interval_ms, 1000);
    }

    #[test]
    fn test_weight_defaults_to_equal() {
        let settings = Settings::from_toml(
            r#"
            [logger]
            level = "debug"

            [window]
            capacity = 5

            [report]
            interval_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.window.weight, WeightPolicy::Equal);
    }

    #[test]
    fn test_unknown_weight_rejected() {
        let result = Settings::from_toml(
            r#"
            [logger]
            level = "info"

            [window]
            capacity = 5
            weight = "exponential"

            [report]
            interval_ms = 10
            "#,
        );

        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_override_file() {
        let err = Settings::from_path("/nonexistent/rollwin.toml").unwrap_err();

        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read settings file /nonexistent/rollwin.toml"));
    }

    #[test]
    fn test_unset_env_uses_defaults() {
        let settings = Settings::from_env_value(Err(VarError::NotPresent)).unwrap();
        assert_eq!(settings.window.capacity, 60);
    }

    #[test]
    fn test_non_unicode_env_rejected() {
        let result = Settings::from_env_value(Err(VarError::NotUnicode(OsString::from("bad"))));
        assert!(matches!(result, Err(SettingsError::Env { name: CONFIG_ENV, .. })));
    }

    #[test]
    fn test_negative_capacity_reads_as_zero() {
        let settings = Settings::from_toml(
            r#"
            [logger]
            level = "info"

            [window]
            capacity = -1

            [report]
            interval_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.window.capacity, 0);
        assert_eq!(rollwin_core::RingAccumulator::new(settings.window.capacity).capacity(), 2);
    }
}
