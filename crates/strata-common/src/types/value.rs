//! The type-erased cell value.
//!
//! `Value` is used at API boundaries where the concrete element type of a
//! column is erased: row appends, single-cell reads, and the search value of
//! a scan predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DataType;

/// A single cell value, tagged with its element type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// Returns the element type tag of this value.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Int,
            Value::Long(_) => DataType::Long,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::String(_) => DataType::String,
        }
    }

    /// Returns true for the numeric variants.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.data_type().is_numeric()
    }

    /// Widens any numeric variant to an `i64`.
    ///
    /// Fractional parts truncate toward zero. Returns `None` for strings.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Double(v) => Some(*v as i64),
            Value::String(_) => None,
        }
    }

    /// Widens any numeric variant to an `f64`. Returns `None` for strings.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            Value::String(_) => None,
        }
    }

    /// Borrows the string payload. Returns `None` for numeric variants.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_tags() {
        assert_eq!(Value::from(1i32).data_type(), DataType::Int);
        assert_eq!(Value::from(1i64).data_type(), DataType::Long);
        assert_eq!(Value::from(1.0f32).data_type(), DataType::Float);
        assert_eq!(Value::from(1.0f64).data_type(), DataType::Double);
        assert_eq!(Value::from("x").data_type(), DataType::String);
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::from(7i32).as_i64(), Some(7));
        assert_eq!(Value::from(3.9f64).as_i64(), Some(3));
        assert_eq!(Value::from(-3.9f64).as_i64(), Some(-3));
        assert_eq!(Value::from(7i32).as_f64(), Some(7.0));
        assert_eq!(Value::from("7").as_i64(), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(1i32).as_str(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(42i32).to_string(), "42");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }
}
