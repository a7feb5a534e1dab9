//! Sequential, fault-isolated hook dispatch.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;

use crate::diagnostics;
use crate::entry::Entry;
use crate::hook::{Hook, HookError};

/// One hook that failed to flush or close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub hook: String,
    pub reason: String,
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.hook, self.reason)
    }
}

/// Returned by `Logger::flush` and `Logger::close` when any hook failed.
#[derive(Debug, Error)]
#[error("{} of {total} hooks failed: {}", .failures.len(), join(.failures))]
pub struct FlushError {
    pub failures: Vec<HookFailure>,
    pub total: usize,
}

fn join(failures: &[HookFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Process,
    Flush,
    Close,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Process => "process",
            Stage::Flush => "flush",
            Stage::Close => "close",
        }
    }
}

/// Run one hook stage, converting panics into failure reasons.
fn guarded<F>(hook: &dyn Hook, stage: Stage, f: F) -> Option<HookFailure>
where
    F: FnOnce() -> Result<(), HookError>,
{
    let reason = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => return None,
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    diagnostics::hook_failed(hook.name(), stage.as_str(), &reason);
    Some(HookFailure {
        hook: hook.name().to_string(),
        reason,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Hand `entry` to every hook in order; failures are reported, not returned.
pub(crate) fn process(hooks: &[Arc<dyn Hook>], entry: &Entry) {
    for hook in hooks {
        guarded(hook.as_ref(), Stage::Process, || hook.process(entry));
    }
}

pub(crate) fn flush(hooks: &[Arc<dyn Hook>]) -> Result<(), FlushError> {
    collect(hooks, Stage::Flush, |hook| hook.flush())
}

pub(crate) fn close(hooks: &[Arc<dyn Hook>]) -> Result<(), FlushError> {
    collect(hooks, Stage::Close, |hook| hook.close())
}

fn collect<F>(hooks: &[Arc<dyn Hook>], stage: Stage, f: F) -> Result<(), FlushError>
where
    F: Fn(&dyn Hook) -> Result<(), HookError>,
{
    let failures: Vec<HookFailure> = hooks
        .iter()
        .filter_map(|hook| guarded(hook.as_ref(), stage, || f(hook.as_ref())))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(FlushError {
            failures,
            total: hooks.len(),
        })
    }
}
