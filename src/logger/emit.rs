//! Level methods and entry construction.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use crate::entry::{Caller, Entry};
use crate::field::{arg, Field, IntoArgs, MESSAGE_KEY};
use crate::hook::dispatch;
use crate::level::Level;
use crate::logger::{Contextual, Logger};

macro_rules! level_methods {
    ($($(#[$doc:meta])* $level:ident => $values:ident, $formatted:ident;)*) => {
        $(
            $(#[$doc])*
            #[track_caller]
            pub fn $values(&self, args: impl IntoArgs) {
                self.log(Level::$level, args);
            }

            $(#[$doc])*
            #[track_caller]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                self.logf(Level::$level, args);
            }
        )*
    };
}

impl Logger {
    level_methods! {
        /// Log at trace level.
        Trace => trace, tracef;
        /// Log at debug level.
        Debug => debug, debugf;
        /// Log at info level.
        Info => info, infof;
        /// Log at warning level.
        Warning => warn, warnf;
        /// Log at error level.
        Error => error, errorf;
        /// Log at critical level.
        Critical => critical, criticalf;
    }

    /// Values form: each argument is a field, a record, or text joined into
    /// the `message` field. No arguments emits the context fields alone.
    #[track_caller]
    pub fn log(&self, level: Level, args: impl IntoArgs) {
        if !self.enabled(level) {
            return;
        }
        let fields = arg::resolve(args.into_args());
        self.emit(level, fields, Location::caller());
    }

    /// Formatted form: produces exactly one `message` field.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, vec![format_message(args)], Location::caller());
    }

    /// Log at critical level, flush, then panic the current thread.
    ///
    /// Unwinding starts after every hook has seen the entry; it cannot be
    /// suppressed by the logger's level.
    #[track_caller]
    pub fn panic(&self, args: impl IntoArgs) -> ! {
        let fields = arg::resolve(args.into_args());
        let message = fields
            .iter()
            .rev()
            .find(|f| f.key() == MESSAGE_KEY)
            .map(|f| f.value().to_string())
            .unwrap_or_else(|| "logger panic".to_string());
        self.terminate(Level::Critical, fields, Location::caller());
        panic!("{}", message)
    }

    /// Formatted form of [`Logger::panic`].
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let field = format_message(args);
        let message = field.value().to_string();
        self.terminate(Level::Critical, vec![field], Location::caller());
        panic!("{}", message)
    }

    /// Log at fatal level, flush, then exit the process with status 1.
    ///
    /// This is irreversible: destructors of other threads do not run.
    #[track_caller]
    pub fn fatal(&self, args: impl IntoArgs) -> ! {
        let fields = arg::resolve(args.into_args());
        self.terminate(Level::Fatal, fields, Location::caller());
        std::process::exit(1)
    }

    /// Formatted form of [`Logger::fatal`].
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.terminate(Level::Fatal, vec![format_message(args)], Location::caller());
        std::process::exit(1)
    }

    fn terminate(&self, level: Level, fields: Vec<Field>, location: &'static Location<'static>) {
        if self.enabled(level) {
            self.emit(level, fields, location);
        }
        // Failures were already reported per hook.
        let _ = self.flush();
    }

    fn emit(&self, level: Level, fields: Vec<Field>, location: &'static Location<'static>) {
        let caller = if self.captures_caller() {
            Caller::from_location(location)
        } else {
            Caller::default()
        };
        let entry = Entry::new(level, self.fields().appended(fields), caller);
        dispatch::process(self.hooks(), &entry);
    }
}

fn format_message(args: fmt::Arguments<'_>) -> Field {
    let text = match args.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(args.to_string()),
    };
    Field::message(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Arg, Value};
    use crate::hook::MemoryHook;
    use std::sync::Arc;

    fn recorded(level: Level) -> (Logger, Arc<MemoryHook>) {
        let hook = Arc::new(MemoryHook::new());
        (Logger::new(level).with_hook(hook.clone()), hook)
    }

    #[test]
    fn test_filtered_calls_do_nothing() {
        let (logger, hook) = recorded(Level::Info);
        logger.debugf(format_args!("hidden {}", 1));
        logger.trace(["hidden"]);
        assert!(hook.is_empty());

        logger.warnf(format_args!("shown"));
        assert_eq!(hook.len(), 1);
    }

    #[test]
    fn test_formatted_produces_single_message() {
        let (logger, hook) = recorded(Level::Debug);
        logger.with_value("req", 7).infof(format_args!("took {}ms", 12));

        let entries = hook.entries();
        let entry = &entries[0];
        assert_eq!(entry.level(), Level::Info);
        assert_eq!(entry.message().and_then(Value::as_str), Some("took 12ms"));
        assert_eq!(entry.fields().value("req").and_then(Value::as_i64), Some(7));
        assert_eq!(entry.fields().len(), 2);
    }

    #[test]
    fn test_values_with_structured_fields() {
        let (logger, hook) = recorded(Level::Info);
        logger.info([Field::text("user", "ada"), Field::int("_id", 42)]);

        let entries = hook.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level(), Level::Info);
        assert_eq!(entries[0].fields().value("_id").and_then(Value::as_i64), Some(42));
        assert_eq!(entries[0].fields().value("user").and_then(Value::as_str), Some("ada"));
        assert!(entries[0].message().is_none());
    }

    #[test]
    fn test_values_without_arguments_emits_context() {
        let (logger, hook) = recorded(Level::Info);
        logger.with_value("phase", "boot").info(());

        let entries = hook.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].fields().keys(), vec!["phase"]);
    }

    #[test]
    fn test_call_site_fields_shadow_context() {
        let (logger, hook) = recorded(Level::Info);
        logger
            .with_value("status", "pending")
            .error([Arg::from(Field::text("status", "failed")), Arg::from("payment declined")]);

        let entries = hook.entries();
        let entry = &entries[0];
        assert_eq!(entry.fields().value("status").and_then(Value::as_str), Some("failed"));
        assert_eq!(entry.message().and_then(Value::as_str), Some("payment declined"));
    }

    #[test]
    fn test_caller_capture_toggle() {
        let (logger, hook) = recorded(Level::Info);
        logger.info("with caller");
        logger.with_caller(false).info("without caller");

        let entries = hook.entries();
        assert!(entries[0].caller().captured);
        assert!(entries[0].caller().file.ends_with("emit.rs"));
        assert!(!entries[1].caller().captured);
        assert_eq!(entries[1].caller().line, 0);
    }

    #[test]
    fn test_hooks_called_in_attachment_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        struct Tagged(&'static str, Arc<std::sync::Mutex<Vec<&'static str>>>);
        impl crate::hook::Hook for Tagged {
            fn process(&self, _entry: &Entry) -> Result<(), crate::hook::HookError> {
                self.1.lock().unwrap().push(self.0);
                Ok(())
            }
        }

        let logger = Logger::new(Level::Info)
            .with_hook(Arc::new(Tagged("first", order.clone())))
            .with_hook(Arc::new(Tagged("second", order.clone())))
            .with_hook(Arc::new(Tagged("third", order.clone())));
        logger.info("go");
        logger.error("again");

        assert_eq!(
            *order.lock().unwrap(),
            vec!["first", "second", "third", "first", "second", "third"]
        );
    }

    #[test]
    #[should_panic(expected = "invariant broken")]
    fn test_panic_logs_then_unwinds() {
        let (logger, _hook) = recorded(Level::Info);
        logger.panic("invariant broken");
    }

    #[test]
    fn test_panic_entry_reaches_hooks_before_unwinding() {
        let (logger, hook) = recorded(Level::Info);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panicf(format_args!("bad state {}", 3))
        }));

        assert!(result.is_err());
        let entries = hook.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level(), Level::Critical);
        assert_eq!(hook.flush_count(), 1);
    }

    #[test]
    fn test_closed_logger_drops_entries() {
        let (logger, hook) = recorded(Level::Trace);
        logger.close().unwrap();
        logger.error("after close");
        assert!(hook.is_empty());
    }
}
