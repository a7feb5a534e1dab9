//! Log entries.
//!
//! An [`Entry`] is the immutable snapshot produced by one logging call that
//! passed the level filter. Hooks receive it by reference for the duration
//! of `process`; cloning is cheap because the fields are shared.

use std::panic::Location;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::field::{Fields, Value, MESSAGE_KEY};
use crate::level::Level;

/// Call-site location of a logging call.
///
/// Zero-valued when caller capture is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    pub captured: bool,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Caller {
    pub(crate) fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            captured: true,
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Immutable record of a single logging call.
#[derive(Debug, Clone)]
pub struct Entry {
    timestamp: SystemTime,
    level: Level,
    fields: Fields,
    caller: Caller,
}

impl Entry {
    pub fn new(level: Level, fields: Fields, caller: Caller) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            fields,
            caller,
        }
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Context fields followed by call-site fields, last write wins.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    /// Effective value of the `message` field, if any.
    pub fn message(&self) -> Option<&Value> {
        self.fields.value(MESSAGE_KEY)
    }

    /// Milliseconds since the unix epoch.
    pub fn unix_millis(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Keys written by the entry itself; user fields with these names are
/// serialized as `fields.<key>`.
const RESERVED_KEYS: [&str; 3] = ["time", "level", "caller"];

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let resolved = self.fields.resolved();
        let mut map = serializer.serialize_map(Some(resolved.len() + 3))?;
        map.serialize_entry("time", &self.unix_millis())?;
        map.serialize_entry("level", &self.level)?;
        if self.caller.captured {
            map.serialize_entry(
                "caller",
                &format!("{}:{}", self.caller.file, self.caller.line),
            )?;
        }
        for field in resolved {
            let key = field.key();
            if RESERVED_KEYS.contains(&key) {
                map.serialize_entry(&format!("fields.{}", key), field.value())?;
            } else {
                map.serialize_entry(key, field.value())?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn test_entry_serializes_flat() {
        let fields = Fields::from(vec![
            Field::text("user", "ada"),
            Field::int("attempt", 1),
            Field::int("attempt", 2),
        ]);
        let entry = Entry::new(Level::Warning, fields, Caller::default());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["level"], "warning");
        assert_eq!(json["user"], "ada");
        assert_eq!(json["attempt"], 2);
        assert!(json.get("caller").is_none());
        assert!(json["time"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_user_fields_never_shadow_entry_keys() {
        let fields = Fields::from(vec![
            Field::text("level", "user-data"),
            Field::int("time", 5),
            Field::message("x"),
        ]);
        let entry = Entry::new(Level::Error, fields, Caller::default());
        let text = serde_json::to_string(&entry).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["level"], "error");
        assert_eq!(json["fields.level"], "user-data");
        assert_eq!(json["fields.time"], 5);
        assert_ne!(json["time"], 5);
        assert_eq!(text.matches("\"level\":").count(), 1);
    }

    #[test]
    fn test_caller_from_location() {
        let caller = Caller::from_location(Location::caller());
        assert!(caller.captured);
        assert!(caller.file.ends_with(".rs"));
        assert!(caller.line > 0);
        assert_eq!(Caller::default().line, 0);
    }

    #[test]
    fn test_message_accessor() {
        let entry = Entry::new(
            Level::Info,
            Fields::from(vec![Field::message("hello")]),
            Caller::default(),
        );
        assert_eq!(entry.message().and_then(Value::as_str), Some("hello"));
    }
}
