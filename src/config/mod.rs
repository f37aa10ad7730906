//! Lane configuration.
//!
//! Layered the usual way: built-in defaults, then an optional TOML file,
//! then environment overrides. The runner owns where the file lives and
//! when to load it; this module only parses and merges.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeOptions;
use crate::retention::{ParseRetentionError, Retention};

/// Environment variable overriding the artifact retention policy.
pub const RETENTION_ENV: &str = "MEDIALANE_RETENTION";

/// Errors loading lane configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override held an unparseable value.
    #[error(transparent)]
    Retention(#[from] ParseRetentionError),
}

/// Artifact-related settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Retention policy applied by the artifact manager.
    #[serde(default)]
    pub retention: Retention,
}

/// Decode-related settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Options the runner hands to the decode backend with every job.
    #[serde(default)]
    pub options: DecodeOptions,
}

/// Effective lane configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Artifact manager settings.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Decode cache settings.
    #[serde(default)]
    pub decode: DecodeConfig,
}

impl LaneConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load `path` if it exists, falling back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides on top of this config.
    ///
    /// Only `MEDIALANE_RETENTION` is recognized; it accepts the policy
    /// names and the 0/1/2 numeric encoding.
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(value) = std::env::var(RETENTION_ENV) {
            self.artifacts.retention = value.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LaneConfig::default();
        assert_eq!(config.artifacts.retention, Retention::None);
        assert!(config.decode.options.is_empty());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medialane.toml");
        fs::write(
            &path,
            r#"
[artifacts]
retention = "fail"

[decode.options]
hwaccel = "vaapi"
threads = 4
"#,
        )
        .unwrap();

        let config = LaneConfig::load(&path).unwrap();
        assert_eq!(config.artifacts.retention, Retention::Fail);
        assert_eq!(
            config.decode.options.get("hwaccel").and_then(|v| v.as_str()),
            Some("vaapi")
        );
        assert_eq!(
            config.decode.options.get("threads").and_then(|v| v.as_i64()),
            Some(4)
        );
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medialane.toml");
        fs::write(&path, "[artifacts]\nretention = \"all\"\n").unwrap();

        let config = LaneConfig::load(&path).unwrap();
        assert_eq!(config.artifacts.retention, Retention::All);
        assert!(config.decode.options.is_empty());
    }

    #[test]
    fn test_load_rejects_bad_retention() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medialane.toml");
        fs::write(&path, "[artifacts]\nretention = \"sometimes\"\n").unwrap();

        assert!(matches!(
            LaneConfig::load(&path).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = LaneConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.artifacts.retention, Retention::None);
    }

    // The only test in the crate touching RETENTION_ENV; nothing else
    // reads the environment, so no serialization is needed.
    #[test]
    fn test_env_override() {
        std::env::set_var(RETENTION_ENV, "2");
        let config = LaneConfig::default().with_env().unwrap();
        std::env::remove_var(RETENTION_ENV);
        assert_eq!(config.artifacts.retention, Retention::All);

        let config = LaneConfig::default().with_env().unwrap();
        assert_eq!(config.artifacts.retention, Retention::None);
    }
}
