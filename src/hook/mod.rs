//! Hooks: pluggable consumers of entries.
//!
//! # Data Flow
//! ```text
//! Logger call (level enabled)
//!     → Entry built
//!     → dispatch.rs: every attached hook, in attachment order
//!         → Hook::process(&Entry)   (errors/panics isolated per hook)
//!     → failures reported via diagnostics (tracing target "ctxlog::hook")
//!
//! Logger::flush / Logger::close
//!     → dispatch.rs: Hook::flush / Hook::close on every hook
//!     → failures collected into FlushError
//! ```
//!
//! # Design Decisions
//! - Hooks run synchronously on the caller's path; no implicit threads
//! - A failing hook never stops the remaining hooks and never reaches the
//!   code that logged
//! - Hooks own their synchronization; the same instance may be shared by
//!   many derived loggers on many threads

pub mod dispatch;
pub mod memory;
pub mod tracing_bridge;

pub use dispatch::{FlushError, HookFailure};
pub use memory::MemoryHook;
pub use tracing_bridge::TracingHook;

use thiserror::Error;

use crate::entry::Entry;

/// Errors a hook may report.
#[derive(Debug, Error)]
pub enum HookError {
    /// Underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The hook was closed and no longer accepts entries.
    #[error("hook is closed")]
    Closed,

    /// Any other hook specific failure.
    #[error("{0}")]
    Other(String),
}

/// A pipeline stage receiving every entry of the loggers it is attached to.
pub trait Hook: Send + Sync {
    /// Consume one entry.
    fn process(&self, entry: &Entry) -> Result<(), HookError>;

    /// Persist anything buffered.
    fn flush(&self) -> Result<(), HookError> {
        Ok(())
    }

    /// Flush and release resources; later entries may be rejected.
    fn close(&self) -> Result<(), HookError> {
        self.flush()
    }

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
