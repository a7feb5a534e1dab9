//! Explicit observer propagation.
//!
//! Hosts build one default [`Observer`] at startup and pass a [`Context`]
//! down their call chain. A context without an observer falls back to the
//! default the caller supplies; there is no process-wide instance.

use crate::observer::Observer;

/// Per-request carrier for an optional observer.
#[derive(Debug, Clone, Default)]
pub struct Context {
    observer: Option<Observer>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same context carrying `observer`.
    pub fn with_observer(&self, observer: Observer) -> Context {
        Context {
            observer: Some(observer),
        }
    }

    pub fn observer(&self) -> Option<&Observer> {
        self.observer.as_ref()
    }

    /// The carried observer, or `default` when there is none.
    pub fn observer_or<'a>(&'a self, default: &'a Observer) -> &'a Observer {
        self.observer.as_ref().unwrap_or(default)
    }
}

impl From<Observer> for Context {
    fn from(observer: Observer) -> Self {
        Context {
            observer: Some(observer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Contextual;

    #[test]
    fn test_falls_back_to_default() {
        let default = Observer::new().with_value("scope", "default");
        let ctx = Context::new();
        assert!(ctx.observer().is_none());
        assert!(ctx.observer_or(&default).fields().contains_key("scope"));
    }

    #[test]
    fn test_carried_observer_wins() {
        let default = Observer::new();
        let request = Observer::new().with_trace_id(["req-1"]);
        let ctx = Context::new().with_observer(request);

        let observer = ctx.observer_or(&default);
        assert!(observer.trace_ids().contains("req-1"));
    }
}
