//! Multi-tool observability.
//!
//! # Data Flow
//! ```text
//! Observer { tools, fields, trace_ids }
//!     → with_value / with_fields / ...   (every tool derived, each one
//!                                          dropping the fields it skips)
//!     → with_trace_id                     (ids appended, never replaced)
//!     → logger()   → Logger tagged with trace_ids
//!     → metrics()  → MetricsTool labelled with context fields
//!     → tool::<T>() / tools().by_name()   (null object when absent)
//! ```
//!
//! # Design Decisions
//! - Lookups never fail: a missing tool yields `T::default()` or a
//!   `NoopTool`, so call sites need no presence checks
//! - Tools are few; a linear scan over a shared slice beats a map
//! - Per-field properties let each tool decide what it keeps

mod aggregate;
pub mod metrics;
pub mod noop;
pub mod tool;
pub mod trace;

pub use aggregate::{Observer, TRACE_IDS_KEY};
pub use self::metrics::MetricsTool;
pub use noop::NoopTool;
pub use tool::{Tool, ToolError, Tools};
pub use trace::{TraceId, TraceIds};
