//! The field-derivation contract shared by loggers and observers.

use std::borrow::Cow;

use serde::Serialize;

use crate::field::record::{self, Shape};
use crate::field::{Field, Fields, Value};

/// Types that carry accumulated context fields and derive new instances
/// with more of them.
///
/// Every method returns a new value; the receiver is never modified.
pub trait Contextual: Sized {
    /// Derive with `fields` appended; later keys shadow earlier ones.
    fn with_fields<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>;

    /// Accumulated fields.
    fn fields(&self) -> &Fields;

    /// Derive with a single key/value pair.
    fn with_value(&self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.with_fields([Field::new(key, value)])
    }

    /// Derive with every pair of a mapping.
    fn with_map<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        self.with_fields(entries.into_iter().map(Field::from))
    }

    /// Derive with one field per member of a serializable record.
    ///
    /// Values that do not serialize to an object are stringified into the
    /// `message` field.
    fn with_struct<T: Serialize + ?Sized>(&self, value: &T) -> Self {
        match record::inspect(value) {
            Shape::Record(fields) => self.with_fields(fields),
            Shape::Scalar(text) => self.with_fields([Field::message(text)]),
        }
    }
}
