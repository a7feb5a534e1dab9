use std::any::Any;
use std::sync::Arc;

use crate::field::Field;
use crate::observer::tool::Tool;

/// Tool that ignores everything. Returned when a lookup finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTool;

impl Tool for NoopTool {
    fn name(&self) -> &str {
        "noop"
    }

    fn derive(&self, _fields: &[Field]) -> Arc<dyn Tool> {
        Arc::new(NoopTool)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
