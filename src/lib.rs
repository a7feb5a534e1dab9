//! Contextual structured logging and multi-tool observability.
//!
//! # Data Flow
//! ```text
//! Logger / Observer (immutable, cheap to clone)
//!     → with_* derivation     (fields appended, receiver untouched)
//!     → level method          (filtered by Level before any work)
//!     → Entry                 (timestamp, level, resolved fields, caller)
//!     → Hooks                 (attachment order, faults isolated)
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod entry;
pub mod field;
pub mod hook;
pub mod level;
pub mod logger;
pub mod observer;

pub use context::Context;
pub use entry::{Caller, Entry};
pub use field::{Arg, Field, Fields, IntoArgs, Property, Value, MESSAGE_KEY};
pub use hook::{FlushError, Hook, HookError, MemoryHook, TracingHook};
pub use level::{parse_level, Level, ParseLevelError};
pub use logger::{Contextual, Logger};
pub use observer::{MetricsTool, NoopTool, Observer, Tool, ToolError, Tools, TraceId, TraceIds};
