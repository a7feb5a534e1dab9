//! Internal diagnostics.
//!
//! # Responsibilities
//! - Report faults of the logging pipeline itself (failing hooks)
//! - Install a `tracing` subscriber for hosts that have none
//!
//! # Design Decisions
//! - Uses the tracing crate, never the loggers built by this crate, so a
//!   broken hook cannot hide its own failure
//! - Env filter first (`RUST_LOG`), caller supplied default otherwise

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Returned when a global subscriber is already installed.
#[derive(Debug, Error)]
#[error("failed to install diagnostics subscriber: {0}")]
pub struct DiagnosticsError(#[from] tracing_subscriber::util::TryInitError);

/// Install a fmt subscriber filtered by `RUST_LOG` or `default_filter`.
pub fn init(default_filter: &str) -> Result<(), DiagnosticsError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

pub(crate) fn hook_failed(hook: &str, stage: &'static str, reason: &str) {
    tracing::warn!(
        target: "ctxlog::hook",
        hook,
        stage,
        reason,
        "Hook failed, continuing with remaining hooks"
    );
}
