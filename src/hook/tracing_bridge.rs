//! Tracing library adapter.

use crate::entry::Entry;
use crate::field::MESSAGE_KEY;
use crate::hook::{Hook, HookError};
use crate::level::Level;

/// Hook that re-emits entries as `tracing` events.
///
/// This bridges entries into whatever subscriber the host installed
/// (`fmt`, JSON, OpenTelemetry). Critical and fatal entries become
/// `ERROR` events; the original level travels in the `severity` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl TracingHook {
    pub fn new() -> Self {
        Self
    }
}

/// Render every non-message field as a compact JSON object.
fn render_fields(entry: &Entry) -> String {
    let map: serde_json::Map<String, serde_json::Value> = entry
        .fields()
        .resolved()
        .into_iter()
        .filter(|f| f.key() != MESSAGE_KEY)
        .map(|f| (f.key().to_string(), f.value().to_json()))
        .collect();
    serde_json::Value::Object(map).to_string()
}

impl Hook for TracingHook {
    fn process(&self, entry: &Entry) -> Result<(), HookError> {
        let message = entry.message().map(|m| m.to_string()).unwrap_or_default();
        let fields = render_fields(entry);
        let severity = entry.level().as_str();
        let caller = entry.caller();
        let line = caller.line;
        let file = caller.file;

        match entry.level() {
            Level::Trace => {
                tracing::trace!(target: "ctxlog", severity, fields = %fields, file, line, "{}", message)
            }
            Level::Debug => {
                tracing::debug!(target: "ctxlog", severity, fields = %fields, file, line, "{}", message)
            }
            Level::Info => {
                tracing::info!(target: "ctxlog", severity, fields = %fields, file, line, "{}", message)
            }
            Level::Warning => {
                tracing::warn!(target: "ctxlog", severity, fields = %fields, file, line, "{}", message)
            }
            Level::Error | Level::Critical | Level::Fatal => {
                tracing::error!(target: "ctxlog", severity, fields = %fields, file, line, "{}", message)
            }
            Level::Undefined => {}
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "tracing"
    }
}
