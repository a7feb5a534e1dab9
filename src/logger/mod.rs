//! Contextual logger.
//!
//! # Data Flow
//! ```text
//! base Logger (level, fields, hooks)
//!     → with_value / with_fields / with_map / with_struct  (new Logger, fields appended)
//!     → with_level / with_hooks / with_caller              (new Logger, one setting replaced)
//!     → level method (info, errorf, ...)
//!         → enabled? otherwise return immediately
//!         → Entry = accumulated fields + call-site fields + timestamp + caller
//!         → hook::dispatch (attachment order, isolated)
//! ```
//!
//! # Design Decisions
//! - A `Logger` is a small value; cloning and deriving never copy ancestor
//!   fields or hooks, and never mutate the receiver
//! - `with_hooks` with nothing to add clears the hook list
//! - The closed flag is shared by every logger derived from the same root;
//!   each hook of the family is closed exactly once, whichever logger closes it

mod contextual;
mod emit;
mod macros;

pub use contextual::Contextual;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::field::{Field, Fields};
use crate::hook::{dispatch, FlushError, Hook};
use crate::level::Level;

/// Immutable, cheaply clonable structured logger.
#[derive(Clone)]
pub struct Logger {
    level: Level,
    fields: Fields,
    hooks: Arc<[Arc<dyn Hook>]>,
    capture_caller: bool,
    family: Arc<Family>,
}

/// State shared by every logger derived from the same root.
#[derive(Default)]
struct Family {
    closed: AtomicBool,
    closed_hooks: Mutex<Vec<Arc<dyn Hook>>>,
}

impl Family {
    /// Mark `hooks` closed, returning the ones that were not closed yet.
    fn claim(&self, hooks: &[Arc<dyn Hook>]) -> Vec<Arc<dyn Hook>> {
        let mut closed = self
            .closed_hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut pending = Vec::new();
        for hook in hooks {
            if !closed.iter().any(|c| Arc::ptr_eq(c, hook)) {
                closed.push(hook.clone());
                pending.push(hook.clone());
            }
        }
        pending
    }
}

impl Logger {
    /// Create a logger with no fields and no hooks.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            fields: Fields::new(),
            hooks: Arc::from(Vec::new()),
            capture_caller: true,
            family: Arc::new(Family::default()),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Same fields and hooks, different level.
    pub fn with_level(&self, level: Level) -> Logger {
        Logger {
            level,
            ..self.clone()
        }
    }

    pub fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.hooks
    }

    /// Append hooks after the current ones.
    ///
    /// Passing no hooks at all returns a logger with an empty hook list.
    pub fn with_hooks<I>(&self, hooks: I) -> Logger
    where
        I: IntoIterator<Item = Arc<dyn Hook>>,
    {
        let added: Vec<Arc<dyn Hook>> = hooks.into_iter().collect();
        let hooks: Arc<[Arc<dyn Hook>]> = if added.is_empty() {
            Arc::from(Vec::new())
        } else {
            self.hooks.iter().cloned().chain(added).collect()
        };
        Logger {
            hooks,
            ..self.clone()
        }
    }

    /// Append a single hook.
    pub fn with_hook<H: Hook + 'static>(&self, hook: Arc<H>) -> Logger {
        self.with_hooks([hook as Arc<dyn Hook>])
    }

    /// Enable or disable call-site capture for derived calls.
    pub fn with_caller(&self, capture: bool) -> Logger {
        Logger {
            capture_caller: capture,
            ..self.clone()
        }
    }

    pub fn captures_caller(&self) -> bool {
        self.capture_caller
    }

    /// Whether a call at `level` would produce an entry.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.level.enables(level) && !self.is_closed()
    }

    pub fn is_closed(&self) -> bool {
        self.family.closed.load(Ordering::Acquire)
    }

    /// Flush every attached hook. The logger stays usable.
    pub fn flush(&self) -> Result<(), FlushError> {
        dispatch::flush(&self.hooks)
    }

    /// Close every attached hook; later calls from this logger family are
    /// dropped. Hooks already closed through another logger of the family
    /// are skipped, so closing twice is a no-op.
    pub fn close(&self) -> Result<(), FlushError> {
        self.family.closed.store(true, Ordering::Release);
        let pending = self.family.claim(&self.hooks);
        if pending.is_empty() {
            return Ok(());
        }
        tracing::debug!(hooks = pending.len(), "Closing logger hooks");
        dispatch::close(&pending)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(Level::Info)
    }
}

impl Contextual for Logger {
    fn with_fields<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Logger {
            fields: self.fields.appended(fields),
            ..self.clone()
        }
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<&str> = self.hooks.iter().map(|h| h.name()).collect();
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("fields", &self.fields)
            .field("hooks", &hooks)
            .field("capture_caller", &self.capture_caller)
            .field("closed", &self.is_closed())
            .finish()
    }
}
