//! Format-string macros.
//!
//! `log_info!(logger, "user {} signed in", id)` is shorthand for
//! `logger.infof(format_args!(...))`. Arguments are only formatted when the
//! level is enabled.

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.criticalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::field::Value;
    use crate::hook::MemoryHook;
    use crate::level::Level;
    use crate::logger::Logger;
    use std::sync::Arc;

    #[test]
    fn test_macros_route_to_levels() {
        let hook = Arc::new(MemoryHook::new());
        let logger = Logger::new(Level::Trace).with_hook(hook.clone());

        crate::log_trace!(logger, "t");
        crate::log_debug!(logger, "d {}", 1);
        crate::log_info!(logger, "i {}", "x");
        crate::log_warn!(logger, "w");
        crate::log_error!(logger, "e");
        crate::log_critical!(logger, "c");

        let levels: Vec<Level> = hook.entries().iter().map(|e| e.level()).collect();
        assert_eq!(
            levels,
            vec![
                Level::Trace,
                Level::Debug,
                Level::Info,
                Level::Warning,
                Level::Error,
                Level::Critical
            ]
        );
        let second = &hook.entries()[1];
        assert_eq!(second.message().and_then(Value::as_str), Some("d 1"));
    }

    #[test]
    fn test_disabled_macro_skips_formatting() {
        struct Loud;
        impl std::fmt::Display for Loud {
            fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("formatted while disabled");
            }
        }
        let logger = Logger::new(Level::Error);
        crate::log_debug!(logger, "{}", Loud);
    }
}
