//! # Logging Infrastructure
//!
//! Structured logging utilities for the review assignment service.
//! Provides tracing integration with JSON output and environment-based
//! configuration.

pub mod config;
pub mod request_id;

pub use config::LoggingConfig;
pub use request_id::RequestId;
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level (debug, info, warn, error)
/// * `format` - Output format (json, compact)
/// * `log_file` - Optional path to log file
pub fn init(
    level: &str,
    format: &str,
    log_file: Option<&str>,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let config = LoggingConfig::from_env(level, format, log_file);
    init_with_config(config)
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_does_not_panic() {
        // May fail if a global subscriber is already set, which is fine
        let result = init("info", "json", None);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_init_with_config() {
        let config = LoggingConfig {
            level:    "debug".to_string(),
            format:   "compact".to_string(),
            log_file: None,
        };
        let result = init_with_config(config);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_request_id_exports() {
        let id = RequestId::new();
        assert!(!id.as_str().is_empty());
        assert!(id.as_str().len() >= 20);
    }
}
