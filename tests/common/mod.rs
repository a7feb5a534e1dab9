//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use ctxlog::{Entry, Hook, HookError, Level, Logger, MemoryHook};

/// Logger at `level` with a fresh recording hook attached.
pub fn recorded_logger(level: Level) -> (Logger, Arc<MemoryHook>) {
    let hook = Arc::new(MemoryHook::new());
    (Logger::new(level).with_hook(hook.clone()), hook)
}

/// Hook that appends its label to a shared journal on every entry.
#[allow(dead_code)]
pub struct Journal {
    pub label: &'static str,
    pub seen: Arc<Mutex<Vec<&'static str>>>,
}

impl Hook for Journal {
    fn process(&self, _entry: &Entry) -> Result<(), HookError> {
        self.seen.lock().unwrap().push(self.label);
        Ok(())
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Hook that fails every stage.
#[allow(dead_code)]
pub struct Broken;

impl Hook for Broken {
    fn process(&self, _entry: &Entry) -> Result<(), HookError> {
        Err(HookError::Other("broken pipe".into()))
    }

    fn flush(&self) -> Result<(), HookError> {
        panic!("flush exploded");
    }

    fn name(&self) -> &str {
        "broken"
    }
}
