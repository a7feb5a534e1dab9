//! The tool contract and the tool registry.

use std::any::{Any, TypeId};
use std::sync::Arc;

use thiserror::Error;

use crate::field::{Field, Property};
use crate::hook::FlushError;
use crate::logger::{Contextual, Logger};
use crate::observer::noop::NoopTool;

/// Errors reported by [`Tool::flush`].
#[derive(Debug, Error)]
pub enum ToolError {
    /// One or more logger hooks failed.
    #[error(transparent)]
    Hooks(#[from] FlushError),

    /// Any other tool specific failure.
    #[error("{0}")]
    Other(String),
}

/// An observability backend that follows the field-derivation contract.
///
/// `derive` returns a new tool carrying `fields` on top of the receiver's own
/// context. Each tool decides which fields it honors by inspecting
/// [`Field::properties`].
pub trait Tool: Any + Send + Sync {
    /// Stable name used by [`Tools::by_name`] and diagnostics.
    fn name(&self) -> &str;

    fn derive(&self, fields: &[Field]) -> Arc<dyn Tool>;

    fn flush(&self) -> Result<(), ToolError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

impl Tool for Logger {
    fn name(&self) -> &str {
        "logger"
    }

    fn derive(&self, fields: &[Field]) -> Arc<dyn Tool> {
        let kept = fields
            .iter()
            .filter(|f| !f.has_property(&Property::SKIP_LOGGER))
            .cloned();
        Arc::new(self.with_fields(kept))
    }

    fn flush(&self) -> Result<(), ToolError> {
        Logger::flush(self).map_err(ToolError::from)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Small ordered set of tools, at most one per concrete type.
#[derive(Clone)]
pub struct Tools {
    items: Arc<[Arc<dyn Tool>]>,
}

impl Tools {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> + '_ {
        self.items.iter()
    }

    /// The registered tool of type `T`, or `T::default()` when absent.
    pub fn get<T>(&self) -> T
    where
        T: Tool + Clone + Default,
    {
        self.find::<T>().cloned().unwrap_or_default()
    }

    /// The registered tool of type `T`, if any.
    pub fn find<T: Tool>(&self) -> Option<&T> {
        self.items.iter().find_map(|t| t.as_any().downcast_ref::<T>())
    }

    /// The tool registered under `name`, or a [`NoopTool`].
    pub fn by_name(&self, name: &str) -> Arc<dyn Tool> {
        self.items
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .unwrap_or_else(|| Arc::new(NoopTool))
    }

    /// Register `tool`, replacing a tool of the same type in place.
    pub fn with(&self, tool: Arc<dyn Tool>) -> Tools {
        let id = Any::type_id(tool.as_any());
        let mut items: Vec<Arc<dyn Tool>> = self.items.to_vec();
        match items.iter().position(|t| Any::type_id(t.as_any()) == id) {
            Some(i) => items[i] = tool,
            None => items.push(tool),
        }
        Tools {
            items: Arc::from(items),
        }
    }

    /// Whether a tool of type `T` is registered.
    pub fn contains<T: Tool>(&self) -> bool {
        let id = TypeId::of::<T>();
        self.items.iter().any(|t| Any::type_id(t.as_any()) == id)
    }

    /// Derive every tool with `fields`.
    pub fn derive(&self, fields: &[Field]) -> Tools {
        Tools {
            items: self.items.iter().map(|t| t.derive(fields)).collect(),
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Tools::new()
    }
}

impl std::fmt::Debug for Tools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter().map(|t| t.name())).finish()
    }
}
