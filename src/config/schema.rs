//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every
//! section has defaults so an empty file is a valid configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hook::TracingHook;
use crate::level::Level;
use crate::logger::Logger;
use crate::observer::{MetricsTool, Observer};

/// Root configuration for an observer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Logger tool settings.
    pub logger: LoggerConfig,

    /// Metrics tool settings.
    pub metrics: MetricsConfig,
}

impl ObserverConfig {
    /// Build an observer holding a logger and, when enabled, a metrics tool.
    pub fn build(&self) -> Observer {
        let observer = Observer::new().with_tool(Arc::new(self.logger.build()));
        match self.metrics.build() {
            Some(metrics) => observer.with_tool(Arc::new(metrics)),
            None => observer,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Most verbose level that is emitted.
    pub level: Level,

    /// Record the call site of every entry.
    pub capture_caller: bool,

    /// Forward entries to the `tracing` crate.
    pub tracing_bridge: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            capture_caller: true,
            tracing_bridge: false,
        }
    }
}

impl LoggerConfig {
    pub fn build(&self) -> Logger {
        let logger = Logger::new(self.level).with_caller(self.capture_caller);
        if self.tracing_bridge {
            logger.with_hook(Arc::new(TracingHook))
        } else {
            logger
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Register a metrics tool.
    pub enabled: bool,

    /// Prefix prepended to every metric name, joined with `_`.
    pub prefix: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: String::new(),
        }
    }
}

impl MetricsConfig {
    /// `None` when metrics are disabled.
    pub fn build(&self) -> Option<MetricsTool> {
        self.enabled.then(|| MetricsTool::new(self.prefix.clone()))
    }
}
