//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Crates whose logs are shown; everything else (sqlx, tower, hyper, ...)
/// is silenced.
const ALLOWED_CRATES: &[&str] = &[
    "reviewd",
    "cli",
    "server",
    "service",
    "storage",
    "error",
    "logging",
    "entity",
    "migration",
    "sea_orm_migration",
    "serve",
];

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,

    /// Output format (json, compact)
    pub format: String,

    /// Optional log file path
    pub log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:    "info".to_string(),
            format:   "compact".to_string(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:    level.to_string(),
            format:   format.to_string(),
            log_file: std::env::var("REVIEWD_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
        }
    }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let env_filter = self.build_env_filter();

        match self.format.as_str() {
            "json" => self.build_json_subscriber(env_filter),
            _ => self.build_compact_subscriber(env_filter),
        }
    }

    /// Build an EnvFilter that only allows logs from project crates.
    /// This filters both tracing and log crate messages (including SQLx).
    fn build_env_filter(&self) -> EnvFilter {
        let level = self.level.parse().unwrap_or(tracing::Level::INFO);
        let level_str = match level {
            tracing::Level::TRACE => "trace",
            tracing::Level::DEBUG => "debug",
            tracing::Level::INFO => "info",
            tracing::Level::WARN => "warn",
            tracing::Level::ERROR => "error",
        };

        let allowed: Vec<String> = ALLOWED_CRATES
            .iter()
            .map(|c| format!("{}={}", c, level_str))
            .collect();

        EnvFilter::new(format!("{},off", allowed.join(",")))
    }

    /// Build a JSON subscriber for production logging.
    fn build_json_subscriber(&self, filter: EnvFilter) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let subscriber = fmt::layer().json();

        if let Some(ref log_file) = self.log_file {
            let file_appender = tracing_appender::rolling::hourly(
                PathBuf::from(log_file)
                    .parent()
                    .unwrap_or(&PathBuf::from(".")),
                PathBuf::from(log_file)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .as_ref(),
            );
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer().json().with_writer(non_blocking);
            Box::new(
                Registry::default()
                    .with(filter)
                    .with(subscriber)
                    .with(file_layer),
            )
        }
        else {
            Box::new(Registry::default().with(filter).with(subscriber))
        }
    }

    /// Build a compact subscriber for local development and tests.
    fn build_compact_subscriber(&self, filter: EnvFilter) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let subscriber = fmt::layer().compact();
        Box::new(Registry::default().with(filter).with(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "compact");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_config_from_args() {
        let config = LoggingConfig::from_env("debug", "json", Some("/tmp/reviewd.log"));
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "json");
        assert_eq!(config.log_file, Some("/tmp/reviewd.log".to_string()));
    }

    #[test]
    fn test_build_json_subscriber() {
        let config = LoggingConfig {
            level:    "debug".to_string(),
            format:   "json".to_string(),
            log_file: None,
        };
        let _subscriber = config.build();
    }

    #[test]
    fn test_build_compact_subscriber() {
        let config = LoggingConfig {
            level:    "debug".to_string(),
            format:   "compact".to_string(),
            log_file: None,
        };
        let _subscriber = config.build();
    }

    #[test]
    fn test_build_invalid_format_defaults_to_compact() {
        let config = LoggingConfig {
            level:    "debug".to_string(),
            format:   "invalid_format".to_string(),
            log_file: None,
        };
        let _subscriber = config.build();
    }

    #[test]
    fn test_build_invalid_level_defaults_to_info() {
        let config = LoggingConfig {
            level:    "invalid_level".to_string(),
            format:   "json".to_string(),
            log_file: None,
        };
        let _subscriber = config.build();
    }
}
