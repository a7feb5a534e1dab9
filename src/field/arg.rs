//! Values-form call arguments.
//!
//! Each argument of a values-form call (`logger.info([...])`) is resolved at
//! the call boundary into one of three shapes: a structured field, a record
//! (a group of fields), or something to stringify into the message.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::field::record::{self, Shape};
use crate::field::{Field, Fields, Value, MESSAGE_KEY};

/// One argument of a values-form logging call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A single structured field.
    Field(Field),
    /// A record or mapping, already split into fields.
    Record(Vec<Field>),
    /// Anything else; concatenated into the `message` field.
    Display(String),
}

impl Arg {
    /// Split a serializable record into fields; non-records are stringified.
    pub fn record<T: Serialize + ?Sized>(value: &T) -> Arg {
        match record::inspect(value) {
            Shape::Record(fields) => Arg::Record(fields),
            Shape::Scalar(text) => Arg::Display(text),
        }
    }

    /// Build a record from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Arg
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        Arg::Record(entries.into_iter().map(Field::from).collect())
    }

    /// Stringify anything displayable.
    pub fn display(value: impl fmt::Display) -> Arg {
        Arg::Display(value.to_string())
    }
}

impl From<Field> for Arg {
    fn from(field: Field) -> Self {
        Arg::Field(field)
    }
}

impl From<&Fields> for Arg {
    fn from(fields: &Fields) -> Self {
        Arg::Record(fields.to_vec())
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Display(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Display(text)
    }
}

macro_rules! display_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Display(v.to_string())
                }
            }
        )*
    };
}

display_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, bool, char);

/// Anything accepted as the argument list of a values-form call.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl IntoArgs for Arg {
    fn into_args(self) -> Vec<Arg> {
        vec![self]
    }
}

impl IntoArgs for Field {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::Field(self)]
    }
}

impl IntoArgs for &str {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::from(self)]
    }
}

impl IntoArgs for String {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::Display(self)]
    }
}

impl IntoArgs for &Fields {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::from(self)]
    }
}

impl<T: Into<Arg>> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Arg>, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(Into::into).collect()
    }
}

/// Build a heterogeneous argument list: `args!["retrying", Field::int("n", 2)]`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::field::Arg::from($arg)),*]
    };
}

/// Resolve call-site arguments into the fields they contribute.
///
/// Structured arguments keep their order; stringable ones are joined with a
/// single space into one trailing `message` field.
pub(crate) fn resolve(args: Vec<Arg>) -> Vec<Field> {
    let mut fields = Vec::with_capacity(args.len());
    let mut message: Option<String> = None;
    for arg in args {
        match arg {
            Arg::Field(field) => fields.push(field),
            Arg::Record(record) => fields.extend(record),
            Arg::Display(text) => match message.as_mut() {
                Some(m) => {
                    m.push(' ');
                    m.push_str(&text);
                }
                None => message = Some(text),
            },
        }
    }
    if let Some(message) = message {
        fields.push(Field::text(MESSAGE_KEY, message));
    }
    fields
}
