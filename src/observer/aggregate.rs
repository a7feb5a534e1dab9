use std::sync::Arc;

use crate::field::{Field, Fields};
use crate::logger::{Contextual, Logger};
use crate::observer::metrics::MetricsTool;
use crate::observer::tool::{Tool, ToolError, Tools};
use crate::observer::trace::{TraceId, TraceIds};

/// Key of the field that carries the trace-id ancestry on logger output.
pub const TRACE_IDS_KEY: &str = "trace_ids";

/// A set of tools plus the trace ids of the work being observed.
///
/// Deriving an observer derives every tool it holds. The receiver is never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct Observer {
    tools: Tools,
    fields: Fields,
    trace_ids: TraceIds,
}

impl Observer {
    /// Create an observer with no tools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool`, replacing any tool of the same type.
    ///
    /// The tool is derived with the fields this observer already carries.
    pub fn with_tool(&self, tool: Arc<dyn Tool>) -> Observer {
        let tool = if self.fields.is_empty() {
            tool
        } else {
            tool.derive(&self.fields.to_vec())
        };
        Observer {
            tools: self.tools.with(tool),
            ..self.clone()
        }
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    /// The tool of type `T`, or its default when none is registered.
    pub fn tool<T>(&self) -> T
    where
        T: Tool + Clone + Default,
    {
        self.tools.get::<T>()
    }

    /// Append trace ids to the ancestry. Existing ids are kept.
    pub fn with_trace_id<I>(&self, ids: I) -> Observer
    where
        I: IntoIterator,
        I::Item: Into<TraceId>,
    {
        Observer {
            trace_ids: self.trace_ids.with(ids),
            ..self.clone()
        }
    }

    pub fn trace_ids(&self) -> &TraceIds {
        &self.trace_ids
    }

    /// The logger tool, tagged with the trace-id ancestry when there is one.
    pub fn logger(&self) -> Logger {
        let logger = self.tools.get::<Logger>();
        if self.trace_ids.is_empty() {
            logger
        } else {
            logger.with_fields([Field::any(TRACE_IDS_KEY, &self.trace_ids)])
        }
    }

    pub fn metrics(&self) -> MetricsTool {
        self.tools.get::<MetricsTool>()
    }

    /// Flush every tool. All tools are flushed even if one fails; the first
    /// failure is returned.
    pub fn flush(&self) -> Result<(), ToolError> {
        let mut first = None;
        for tool in self.tools.iter() {
            if let Err(e) = tool.flush() {
                tracing::warn!(
                    target: "ctxlog::observer",
                    tool = tool.name(),
                    error = %e,
                    "Tool flush failed"
                );
                first.get_or_insert(e);
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Contextual for Observer {
    fn with_fields<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let fields: Vec<Field> = fields.into_iter().collect();
        if fields.is_empty() {
            return self.clone();
        }
        Observer {
            tools: self.tools.derive(&fields),
            fields: self.fields.appended(fields),
            trace_ids: self.trace_ids.clone(),
        }
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }
}
