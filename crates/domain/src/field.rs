//! Structured fields and loosely typed call arguments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One validated key/value pair attached to a log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    key: Box<str>,
    value: Value,
}

impl Field {
    /// Build a field from a key and any JSON-convertible value.
    pub fn new(key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// String-valued field.
    pub fn string(key: impl Into<Box<str>>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    /// Signed integer field.
    pub fn int(key: impl Into<Box<str>>, value: i64) -> Self {
        Self::new(key, value)
    }

    /// Unsigned integer field.
    pub fn uint(key: impl Into<Box<str>>, value: u64) -> Self {
        Self::new(key, value)
    }

    /// Float field. Non-finite values encode as `null`.
    pub fn float(key: impl Into<Box<str>>, value: f64) -> Self {
        Self::new(key, value)
    }

    /// Boolean field.
    pub fn bool(key: impl Into<Box<str>>, value: bool) -> Self {
        Self::new(key, value)
    }

    /// Field holding any serializable value.
    ///
    /// If serialization fails the field is renamed to `<key>Error` and
    /// carries the serializer's message instead, so the record is still written.
    pub fn any<T>(key: impl Into<Box<str>>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => Self { key, value },
            Err(error) => Self::string(format!("{key}Error"), error.to_string()),
        }
    }

    /// Field named `error` holding the error's display text.
    pub fn error(error: &dyn std::error::Error) -> Self {
        Self::string("error", error.to_string())
    }

    /// Field key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Split into key and value.
    #[must_use]
    pub fn into_parts(self) -> (Box<str>, Value) {
        (self.key, self.value)
    }

    /// Render as a single-entry JSON object.
    #[must_use]
    pub fn into_json_object(self) -> Value {
        let mut map = Map::with_capacity(1);
        map.insert(self.key.into_string(), self.value);
        Value::Object(map)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}", self.key, self.value)
    }
}

/// One element of a loosely typed key/value argument list.
///
/// Raw values still have to be paired up and checked by
/// [`normalize`](crate::normalize); pre-typed fields pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A field built with one of the typed [`Field`] constructors.
    Field(Field),
    /// A raw value, used as either a key or a value depending on position.
    Value(Value),
}

impl Arg {
    /// Returns the raw value when this argument is not a pre-typed field.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Field(_) => None,
        }
    }

    /// Collapse into a JSON value. Pre-typed fields become `{key: value}`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Field(field) => field.into_json_object(),
        }
    }
}

impl From<Field> for Arg {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<()> for Arg {
    fn from((): ()) -> Self {
        Self::Value(Value::Null)
    }
}

impl<T> From<Option<T>> for Arg
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Null), Into::into)
    }
}

macro_rules! arg_from_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

arg_from_json!(
    &str, String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Value(Value::String(value.clone()))
    }
}

/// A key/value pair rejected because its key is not a string.
///
/// Kept whole so the intended pair can be recovered from the diagnostic
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidPair {
    /// Zero-based index of the key in the original argument list.
    pub position: usize,
    /// The non-string key.
    pub key: Value,
    /// The value that followed it.
    pub value: Value,
}
