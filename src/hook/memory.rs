//! In-memory hook.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::entry::Entry;
use crate::hook::{Hook, HookError};

/// A hook that keeps every entry it receives.
///
/// Useful for:
/// - Tests asserting on what was logged
/// - Buffering entries until a caller decides where they go
#[derive(Debug, Default)]
pub struct MemoryHook {
    entries: Mutex<Vec<Entry>>,
    flushes: AtomicUsize,
    closes: AtomicUsize,
    reject_after_close: bool,
    closed: AtomicBool,
}

impl MemoryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook that returns [`HookError::Closed`] once closed.
    pub fn strict() -> Self {
        Self {
            reject_after_close: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the recorded entries, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    /// Remove and return the recorded entries.
    pub fn drain(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::Relaxed)
    }
}

impl Hook for MemoryHook {
    fn process(&self, entry: &Entry) -> Result<(), HookError> {
        if self.reject_after_close && self.closed.load(Ordering::Acquire) {
            return Err(HookError::Closed);
        }
        self.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&self) -> Result<(), HookError> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn close(&self) -> Result<(), HookError> {
        self.closes.fetch_add(1, Ordering::Relaxed);
        self.closed.store(true, Ordering::Release);
        self.flush()
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Caller;
    use crate::field::Fields;
    use crate::level::Level;

    fn entry(level: Level) -> Entry {
        Entry::new(level, Fields::new(), Caller::default())
    }

    #[test]
    fn test_memory_hook_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryHook>();
    }

    #[test]
    fn test_records_in_order() {
        let hook = MemoryHook::new();
        hook.process(&entry(Level::Info)).unwrap();
        hook.process(&entry(Level::Error)).unwrap();

        let levels: Vec<Level> = hook.entries().iter().map(Entry::level).collect();
        assert_eq!(levels, vec![Level::Info, Level::Error]);
        assert_eq!(hook.drain().len(), 2);
        assert!(hook.is_empty());
    }

    #[test]
    fn test_strict_rejects_after_close() {
        let hook = MemoryHook::strict();
        hook.close().unwrap();
        assert!(matches!(hook.process(&entry(Level::Info)), Err(HookError::Closed)));
        assert_eq!(hook.close_count(), 1);
        assert_eq!(hook.flush_count(), 1);

        let lenient = MemoryHook::new();
        lenient.close().unwrap();
        assert!(lenient.process(&entry(Level::Info)).is_ok());
    }
}
