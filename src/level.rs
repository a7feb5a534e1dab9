//! Severity levels.
//!
//! # Responsibilities
//! - Define the ordered severity scale used for filtering
//! - Render levels as canonical text tokens
//! - Parse user supplied text (config files, flags) into a level
//!
//! # Design Decisions
//! - Greater discriminant = more verbose, so filtering is a single compare
//! - `Undefined` is the zero value and never a valid operating level
//! - Parsing keeps the historical quirks: `trace`/`t` resolve to `Debug` and
//!   the error message only lists `fatal..=debug`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Severity of a log entry or operating threshold of a logger.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Level not set, or a failed parse.
    #[default]
    Undefined = 0,
    /// Reports fatal entries only.
    Fatal = 1,
    /// Reports critical and fatal entries.
    Critical = 2,
    /// Reports errors and everything more severe.
    Error = 3,
    /// Reports warnings and everything more severe.
    Warning = 4,
    /// Reports informational entries and everything more severe.
    Info = 5,
    /// Reports debug entries and everything more severe.
    Debug = 6,
    /// Reports everything.
    Trace = 7,
}

/// Returned when text does not name a known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown logging level '{input}', known values are: {allowed}")]
pub struct ParseLevelError {
    input: String,
    allowed: String,
}

impl ParseLevelError {
    /// The rejected input, as given.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Level {
    /// All defined levels, least verbose first.
    pub const ALL: [Level; 8] = [
        Level::Undefined,
        Level::Fatal,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Canonical lowercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Undefined => "undefined",
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Fatal => "fatal",
        }
    }

    /// Convert a raw discriminant, `None` if it is out of range.
    pub fn from_u8(raw: u8) -> Option<Level> {
        Level::ALL.get(raw as usize).copied()
    }

    /// Render a raw discriminant; out of range values become `"unknown"`.
    pub fn name_of(raw: u8) -> &'static str {
        Level::from_u8(raw).map(|l| l.as_str()).unwrap_or("unknown")
    }

    /// Whether a logger operating at `self` lets a call at `call` through.
    #[inline]
    pub fn enables(self, call: Level) -> bool {
        call != Level::Undefined && call <= self
    }
}

/// Parse a level name or alias, case-insensitively.
pub fn parse_level(input: &str) -> Result<Level, ParseLevelError> {
    match input.to_lowercase().as_str() {
        "t" | "trace" => Ok(Level::Debug),
        "d" | "debug" => Ok(Level::Debug),
        "i" | "info" => Ok(Level::Info),
        "w" | "warn" | "warning" => Ok(Level::Warning),
        "e" | "err" | "error" => Ok(Level::Error),
        "c" | "critical" => Ok(Level::Critical),
        "f" | "fatal" => Ok(Level::Fatal),
        _ => {
            // Trace is left out of the listing on purpose; see parse tests.
            let allowed: Vec<&str> = (Level::Fatal as u8..=Level::Debug as u8)
                .map(Level::name_of)
                .collect();
            Err(ParseLevelError {
                input: input.to_string(),
                allowed: allowed.join(", "),
            })
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.eq_ignore_ascii_case("undefined") {
            return Ok(Level::Undefined);
        }
        parse_level(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Undefined < Level::Fatal);
        assert!(Level::Fatal < Level::Critical);
        assert!(Level::Critical < Level::Error);
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_strings() {
        assert_eq!(Level::Undefined.to_string(), "undefined");
        assert_eq!(Level::Trace.to_string(), "trace");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Fatal.to_string(), "fatal");
        assert_eq!(Level::name_of(42), "unknown");
        assert_eq!(Level::name_of(5), "info");
    }

    #[test]
    fn test_parse_aliases() {
        let cases = [
            ("t", Level::Debug),
            ("TRACE", Level::Debug),
            ("d", Level::Debug),
            ("Debug", Level::Debug),
            ("i", Level::Info),
            ("info", Level::Info),
            ("w", Level::Warning),
            ("warn", Level::Warning),
            ("WARNING", Level::Warning),
            ("e", Level::Error),
            ("err", Level::Error),
            ("error", Level::Error),
            ("c", Level::Critical),
            ("critical", Level::Critical),
            ("f", Level::Fatal),
            ("Fatal", Level::Fatal),
        ];
        for (input, expected) in cases {
            let level = parse_level(input).unwrap();
            assert_eq!(level, expected, "input {input}");
            // Canonical output parses back to the same level.
            assert_eq!(parse_level(level.as_str()).unwrap(), level);
        }
    }

    #[test]
    fn test_trace_parses_to_debug() {
        assert_eq!("trace".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("t".parse::<Level>().unwrap(), Level::Debug);
    }

    #[test]
    fn test_parse_unknown_lists_allowed_values() {
        let err = parse_level("verbose").unwrap_err();
        assert_eq!(err.input(), "verbose");
        assert_eq!(
            err.to_string(),
            "unknown logging level 'verbose', known values are: \
             fatal, critical, error, warning, info, debug"
        );
        assert!(!err.to_string().contains("trace"));
        assert!(parse_level("").is_err());
        assert!(parse_level("undefined").is_err());
    }

    #[test]
    fn test_enables() {
        assert!(Level::Info.enables(Level::Info));
        assert!(Level::Info.enables(Level::Error));
        assert!(Level::Info.enables(Level::Fatal));
        assert!(!Level::Info.enables(Level::Debug));
        assert!(!Level::Info.enables(Level::Undefined));
        assert!(!Level::Undefined.enables(Level::Fatal));
        assert!(Level::Trace.enables(Level::Trace));
    }

    #[test]
    fn test_serde_tokens() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let level: Level = serde_json::from_str("\"WARN\"").unwrap();
        assert_eq!(level, Level::Warning);
        let level: Level = serde_json::from_str("\"undefined\"").unwrap();
        assert_eq!(level, Level::Undefined);
        assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
    }
}
