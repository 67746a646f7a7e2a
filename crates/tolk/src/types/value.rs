use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A runtime value substituted into a placeholder or used as a plural count.
///
/// The `Value` enum gives replacement maps a small dynamic type system, so
/// numbers, strings and flags can be passed interchangeably. Only `Number`
/// and `Float` are valid plural counts.
///
/// # Example
///
/// ```
/// use tolk::Value;
///
/// // Integers become Value::Number
/// let count: Value = 42.into();
/// assert_eq!(count.to_string(), "42");
///
/// // Strings become Value::String
/// let name: Value = "Alice".into();
/// assert_eq!(name.as_string(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A boolean flag.
    Bool(bool),

    /// A string value.
    String(String),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can select a plural form.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Float(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

/// Lossless conversions into a variant.
macro_rules! impl_from {
    ($($source:ty => $variant:ident($target:ty)),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from! {
    i32 => Number(i64),
    i64 => Number(i64),
    u32 => Number(i64),
    f64 => Float(f64),
    bool => Bool(bool),
    String => String(String),
    &str => String(String),
}

// Through the shortest decimal form: 0.1_f32 stays 0.1.
impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

// Counts past i64::MAX keep their magnitude as floats.

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}
