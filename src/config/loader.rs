//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ObserverConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ObserverConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), level = %config.logger.level, "Loaded observer config");
    Ok(config)
}

/// Parse and validate configuration from a TOML document.
pub fn parse_config(content: &str) -> Result<ObserverConfig, ConfigError> {
    let config: ObserverConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn test_parse_valid_document() {
        let config = parse_config(
            r#"
            [logger]
            level = "d"
            tracing_bridge = true

            [metrics]
            prefix = "checkout"
            "#,
        )
        .unwrap();
        assert_eq!(config.logger.level, Level::Debug);
        assert!(config.logger.tracing_bridge);
        assert_eq!(config.metrics.prefix, "checkout");
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let err = parse_config("[logger]\nlevel = \"undefined\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: logger.level"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/ctxlog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("ctxlog-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[metrics]\nenabled = false\n").unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!config.metrics.enabled);
        assert_eq!(config.logger.level, Level::Info);
    }
}
