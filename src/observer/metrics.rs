//! Metrics tool.
//!
//! # Responsibilities
//! - Record counters, gauges and histograms through the `metrics` facade
//! - Turn accumulated context fields into metric labels
//!
//! # Design Decisions
//! - Fields marked [`Property::SKIP_METRICS`] never become labels, so a
//!   high-cardinality value can stay on the logger without exploding series
//! - The installed recorder is the host's business; without one every call
//!   is a cheap no-op
//! - `MetricsTool::default()` is disabled and doubles as the null object

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use metrics::Label;

use crate::field::{Field, Fields, Property};
use crate::observer::tool::Tool;

/// Metrics recorder carrying context labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsTool {
    enabled: bool,
    prefix: Cow<'static, str>,
    fields: Fields,
}

impl MetricsTool {
    /// Create an enabled tool. Metric names are emitted as `{prefix}_{name}`,
    /// or unchanged when `prefix` is empty.
    pub fn new(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            enabled: true,
            prefix: prefix.into(),
            fields: Fields::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fields this tool has accepted so far.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Labels attached to every metric, one per effective field.
    pub fn labels(&self) -> Vec<Label> {
        self.fields
            .resolved()
            .into_iter()
            .map(|f| Label::new(f.key().to_string(), f.value().to_string()))
            .collect()
    }

    /// Full metric name for `name`.
    pub fn metric_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.prefix, name)
        }
    }

    /// Add `value` to the counter `name`.
    pub fn increment(&self, name: &str, value: u64) {
        if !self.enabled {
            return;
        }
        metrics::counter!(self.metric_name(name), self.labels()).increment(value);
    }

    /// Set the gauge `name` to `value`.
    pub fn gauge(&self, name: &str, value: f64) {
        if !self.enabled {
            return;
        }
        metrics::gauge!(self.metric_name(name), self.labels()).set(value);
    }

    /// Record one observation of `value` in the histogram `name`.
    pub fn histogram(&self, name: &str, value: f64) {
        if !self.enabled {
            return;
        }
        metrics::histogram!(self.metric_name(name), self.labels()).record(value);
    }
}

impl Tool for MetricsTool {
    fn name(&self) -> &str {
        "metrics"
    }

    fn derive(&self, fields: &[Field]) -> Arc<dyn Tool> {
        let kept = fields
            .iter()
            .filter(|f| !f.has_property(&Property::SKIP_METRICS))
            .cloned();
        Arc::new(MetricsTool {
            fields: self.fields.appended(kept),
            ..self.clone()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
