// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Trainer configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Connection and session settings for the trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Base URL of the database HTTP endpoint
    pub endpoint: String,
    pub database: String,
    pub username: String,
    pub password: Option<String>,
    /// Per-request timeout applied to every transaction round-trip
    pub statement_timeout_ms: u64,
    /// Exercise bundle; exercises are read from the graph when unset
    pub exercises: Option<PathBuf>,
    pub history_file: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            username: "neo4j".to_string(),
            password: None,
            statement_timeout_ms: 30_000,
            exercises: None,
            history_file: PathBuf::from(".cyphertrainer/history.txt"),
        }
    }
}

impl TrainerConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: TrainerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::Invalid("database name is empty".to_string()));
        }

        if self.statement_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "statement_timeout_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrainerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.statement_timeout(), Duration::from_secs(30));
        assert_eq!(config.database, "neo4j");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = TrainerConfig {
            endpoint: "localhost:7474".to_string(),
            ..TrainerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = TrainerConfig {
            statement_timeout_ms: 0,
            ..TrainerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "training", "statement_timeout_ms": 500}}"#).unwrap();

        let config = TrainerConfig::load(file.path()).unwrap();
        assert_eq!(config.database, "training");
        assert_eq!(config.statement_timeout_ms, 500);
        assert_eq!(config.endpoint, "http://localhost:7474");
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            TrainerConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
