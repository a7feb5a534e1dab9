//! Record-like values.
//!
//! Rust has no runtime reflection, so records are taken apart through
//! `serde`: a struct serializes to an object whose members become fields.
//! `#[serde(rename = "...")]` plays the role of the export tag and
//! `#[serde(skip)]` excludes a member.

use std::borrow::Cow;

use serde::Serialize;

use crate::field::{Field, Value};

/// What a serializable value turned out to be.
#[derive(Debug)]
pub(crate) enum Shape {
    /// An object; one field per member.
    Record(Vec<Field>),
    /// Anything else, rendered as text.
    Scalar(String),
}

/// Split a serializable value into fields, or stringify it.
///
/// Members keep their declaration order.
pub(crate) fn inspect<T: Serialize + ?Sized>(value: &T) -> Shape {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Shape::Record(
            map.into_iter()
                .map(|(key, v)| Field::new(Cow::Owned(key), json_to_value(v)))
                .collect(),
        ),
        Ok(serde_json::Value::String(s)) => Shape::Scalar(s),
        Ok(other) => Shape::Scalar(other.to_string()),
        Err(e) => Shape::Scalar(format!("!unserializable({})", e)),
    }
}

/// Convert any serializable value into a field value.
pub(crate) fn to_value<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(v) => json_to_value(v),
        Err(e) => Value::Text(Cow::Owned(format!("!unserializable({})", e))),
    }
}

/// Prefer the native representations for integers and strings.
pub(crate) fn json_to_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(v) => Value::Integer(v),
            None => Value::Opaque(serde_json::Value::Number(n)),
        },
        serde_json::Value::String(s) => Value::Text(Cow::Owned(s)),
        other => Value::Opaque(other),
    }
}
