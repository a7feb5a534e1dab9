//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ObserverConfig (validated, immutable)
//!     → build() → Observer { Logger, MetricsTool }
//! ```
//!
//! # Design Decisions
//! - An empty file yields an Info logger with caller capture and an
//!   unprefixed metrics tool
//! - Level strings go through `parse_level`, so config accepts the same
//!   aliases as code; an undefined level is caught by validation

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LoggerConfig, MetricsConfig, ObserverConfig};
pub use validation::{validate_config, ValidationError};
