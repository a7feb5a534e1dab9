//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject an undefined operating level
//! - Keep metric prefixes inside the charset metric backends accept
//!
//! # Design Decisions
//! - A bad level and a bad prefix are reported together, so one edit of the
//!   file fixes both
//! - No I/O here; `loader.rs` calls `validate_config` after parsing

use thiserror::Error;

use crate::config::schema::ObserverConfig;
use crate::level::Level;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logger.level must not be 'undefined'")]
    UndefinedLevel,

    #[error("metrics.prefix '{0}' must start with a letter and contain only [a-zA-Z0-9_]")]
    InvalidMetricsPrefix(String),
}

/// Check `config`, collecting every error.
pub fn validate_config(config: &ObserverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.logger.level == Level::Undefined {
        errors.push(ValidationError::UndefinedLevel);
    }

    let prefix = &config.metrics.prefix;
    if !prefix.is_empty() && !is_metric_prefix(prefix) {
        errors.push(ValidationError::InvalidMetricsPrefix(prefix.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_metric_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
