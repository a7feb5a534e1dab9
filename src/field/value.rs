//! Field and value types.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::field::record;

/// The representation carried by a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any integer-like scalar that fits in an `i64`.
    Integer(i64),
    /// Text or byte data.
    Text(Cow<'static, str>),
    /// Anything else, kept in serialized form.
    Opaque(serde_json::Value),
}

impl Value {
    /// Integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Convert to a JSON value for serialization.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Integer(v) => serde_json::Value::from(*v),
            Value::Text(v) => serde_json::Value::from(v.as_ref()),
            Value::Opaque(v) => v.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Opaque(serde_json::Value::String(s)) => f.write_str(s),
            Value::Opaque(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Opaque(v) => v.serialize(serializer),
        }
    }
}

macro_rules! integer_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Integer(v as i64)
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Opaque(serde_json::Value::from(v)),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Opaque(serde_json::Value::Bool(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Opaque(serde_json::Value::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Opaque(serde_json::Value::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Cow::Owned(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(v: Cow<'static, str>) -> Self {
        Value::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Text(Cow::Owned(String::from_utf8_lossy(v).into_owned()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::from(v.as_slice())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        record::json_to_value(v)
    }
}

/// Tool-specific directive attached to a field.
///
/// Properties never change the key or value; tools read them to decide how
/// (or whether) to use the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property(Cow<'static, str>);

impl Property {
    /// Metrics tools must not turn this field into a label.
    pub const SKIP_METRICS: Property = Property(Cow::Borrowed("skip:metrics"));
    /// Logger tools must not record this field.
    pub const SKIP_LOGGER: Property = Property(Cow::Borrowed("skip:logger"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One structured key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
    properties: Vec<Property>,
}

impl Field {
    /// Create a field from any value convertible into [`Value`].
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            properties: Vec::new(),
        }
    }

    /// Integer field.
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, Value::Integer(value))
    }

    /// Text field. Static strings are stored without allocating.
    pub fn text(key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        Self::new(key, Value::Text(value.into()))
    }

    /// Field holding any serializable value.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<Cow<'static, str>>, value: &T) -> Self {
        Self::new(key, record::to_value(value))
    }

    /// The `message` field.
    pub fn message(text: impl Into<Cow<'static, str>>) -> Self {
        Self::text(super::MESSAGE_KEY, text)
    }

    /// Return a copy of this field carrying an extra property.
    pub fn with_property(mut self, property: Property) -> Self {
        if !self.properties.contains(&property) {
            self.properties.push(property);
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn has_property(&self, property: &Property) -> bool {
        self.properties.contains(property)
    }
}

impl<K, V> From<(K, V)> for Field
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(42u8), Value::Integer(42));
        assert_eq!(Value::from(-7i32), Value::Integer(-7));
        assert_eq!(Value::from(7usize), Value::Integer(7));
        assert_eq!(Value::from("abc"), Value::Text("abc".into()));
        assert_eq!(Value::from(b"hi".as_slice()), Value::Text("hi".into()));
        assert_eq!(Value::from(true), Value::Opaque(serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_large_unsigned_stays_exact() {
        let v = Value::from(u64::MAX);
        assert!(matches!(v, Value::Opaque(_)));
        assert_eq!(v.to_string(), u64::MAX.to_string());
    }

    #[test]
    fn test_static_text_is_borrowed() {
        let field = Field::text("service", "billing");
        match field.value() {
            Value::Text(Cow::Borrowed(s)) => assert_eq!(*s, "billing"),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_properties_do_not_touch_value() {
        let field = Field::int("user_id", 9)
            .with_property(Property::SKIP_METRICS)
            .with_property(Property::SKIP_METRICS);
        assert_eq!(field.key(), "user_id");
        assert_eq!(field.value().as_i64(), Some(9));
        assert_eq!(field.properties().len(), 1);
        assert!(field.has_property(&Property::SKIP_METRICS));
        assert!(!field.has_property(&Property::SKIP_LOGGER));
    }

    #[test]
    fn test_any_prefers_native_representation() {
        assert_eq!(Field::any("n", &5).value(), &Value::Integer(5));
        assert_eq!(Field::any("s", "x").value(), &Value::Text("x".into()));
        let list = Field::any("l", &[1, 2]);
        assert_eq!(list.value().to_string(), "[1,2]");
    }

    #[test]
    fn test_tuple_conversion() {
        let field: Field = ("region", "eu-west").into();
        assert_eq!(field.key(), "region");
        assert_eq!(field.value().as_str(), Some("eu-west"));
    }
}
