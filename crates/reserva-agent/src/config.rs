//! Agent configuration
//!
//! Loaded from TOML. Every field has a default, so a missing file or a partial
//! file is valid.
//!
//! ```toml
//! data_dir = "/var/lib/reserva"
//! claim_duration_days = 1
//! sweep_interval_secs = 1800
//! notification_timeout_ms = 5000
//! seed_filenames = ["file1.txt", "file2.txt", "file3.txt"]
//!
//! [logging]
//! level = "info"
//! ```

use reserva_effects::DEFAULT_SEED_FILENAMES;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted claim lifetime (100 years)
pub const MAX_CLAIM_DURATION_DAYS: u32 = 36_500;

/// Configuration loading or validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("Failed to read config file {path}: {reason}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// File is not valid TOML for this schema
    #[error("Failed to parse config file {path}: {reason}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A field holds an unusable value
    #[error("Invalid configuration: {field} - {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Directory holding `filenames.json`, `claims.json`, `server-config.json`
    pub data_dir: PathBuf,
    /// Lifetime of a claim, in days
    pub claim_duration_days: u32,
    /// Period of the expiry sweeper, in seconds
    pub sweep_interval_secs: u64,
    /// Upper bound on one notification delivery, in milliseconds
    pub notification_timeout_ms: u64,
    /// Registry written on first start
    pub seed_filenames: Vec<String>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            claim_duration_days: 1,
            sweep_interval_secs: 30 * 60,
            notification_timeout_ms: 5_000,
            seed_filenames: DEFAULT_SEED_FILENAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load from `path`; a missing file yields defaults.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        Self::from_toml_str(&raw).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.claim_duration_days == 0 {
            return Err(ConfigError::Invalid {
                field: "claim_duration_days",
                reason: "must be at least 1".into(),
            });
        }
        if self.claim_duration_days > MAX_CLAIM_DURATION_DAYS {
            return Err(ConfigError::Invalid {
                field: "claim_duration_days",
                reason: format!("must be at most {MAX_CLAIM_DURATION_DAYS}"),
            });
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.notification_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "notification_timeout_ms",
                reason: "must be at least 1".into(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self
            .seed_filenames
            .iter()
            .find(|name| !seen.insert(name.as_str()))
        {
            return Err(ConfigError::Invalid {
                field: "seed_filenames",
                reason: format!("duplicate entry {dup}"),
            });
        }
        Ok(())
    }

    /// Claim lifetime
    pub fn claim_duration(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.claim_duration_days))
    }

    /// Sweeper period
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Notification delivery bound
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = AgentConfig::default();
        assert_eq!(config.claim_duration(), chrono::Duration::days(1));
        assert_eq!(config.sweep_interval(), Duration::from_secs(1800));
        assert_eq!(
            config.seed_filenames,
            vec!["file1.txt", "file2.txt", "file3.txt"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AgentConfig::from_toml_str(
            r#"
            claim_duration_days = 3

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.claim_duration_days, 3);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.sweep_interval_secs, 1800);
    }

    #[test]
    fn rejects_zero_duration_and_bad_level() {
        assert_matches!(
            AgentConfig::from_toml_str("claim_duration_days = 0"),
            Err(ConfigError::Invalid {
                field: "claim_duration_days",
                ..
            })
        );
        assert_matches!(
            AgentConfig::from_toml_str("[logging]\nlevel = \"loud\""),
            Err(ConfigError::Invalid {
                field: "logging.level",
                ..
            })
        );
    }

    #[test]
    fn rejects_durations_past_the_ledger_range() {
        assert_matches!(
            AgentConfig::from_toml_str("claim_duration_days = 3000000"),
            Err(ConfigError::Invalid {
                field: "claim_duration_days",
                ..
            })
        );
        let longest = format!("claim_duration_days = {MAX_CLAIM_DURATION_DAYS}");
        assert!(AgentConfig::from_toml_str(&longest).is_ok());
    }

    #[test]
    fn rejects_duplicate_seed_filenames() {
        assert_matches!(
            AgentConfig::from_toml_str(r#"seed_filenames = ["a", "b", "a"]"#),
            Err(ConfigError::Invalid {
                field: "seed_filenames",
                ..
            })
        );
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AgentConfig::load(&dir.path().join("absent.toml"))
            .await
            .unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[tokio::test]
    async fn parse_errors_name_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reserva.toml");
        std::fs::write(&path, "claim_duration_days = \"one\"").unwrap();

        let err = AgentConfig::load(&path).await.unwrap_err();
        assert_matches!(err, ConfigError::Parse { path: ref p, .. } if p == &path);
    }
}
