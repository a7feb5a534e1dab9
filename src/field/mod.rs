//! Structured fields.
//!
//! # Data Flow
//! ```text
//! call site / derivation
//!     → value.rs  (Field = key + Value + properties)
//!     → record.rs (serde-serializable records split into fields)
//!     → arg.rs    (values-form arguments: field | record | stringable)
//!     → fields.rs (persistent append-only Fields, last write wins)
//!     → Entry
//! ```
//!
//! # Design Decisions
//! - `Value` is a sum type; scalars never go through `serde_json`
//! - `Fields` shares its backing segments between derived loggers, so
//!   deriving never copies ancestor fields
//! - Duplicate keys are resolved lazily when reading, not when appending

pub mod arg;
pub mod fields;
pub mod record;
pub mod value;

pub use arg::{Arg, IntoArgs};
pub use fields::Fields;
pub use value::{Field, Property, Value};

/// Key of the field produced by formatted calls and stringable arguments.
pub const MESSAGE_KEY: &str = "message";
