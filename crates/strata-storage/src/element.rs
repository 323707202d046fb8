//! The closed element-type set and its dispatch point.
//!
//! Every operation that must know a column's concrete element type (segment
//! construction, dictionary compression, scan comparator instantiation,
//! search-value coercion) routes through [`with_data_type!`] and the
//! [`ElementType`] trait. This keeps the set of typed instantiations closed:
//! exactly one per entry in [`DataType`].

use std::cmp::Ordering;
use std::fmt;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{DataType, Value};

use crate::segment::{AnyDictionarySegment, AnyValueSegment, DictionarySegment, ValueSegment};

/// Runs a generic block with `$T` bound to the element type named by a
/// [`DataType`] tag.
///
/// This is the single physical-type fan-out point of the engine. The block
/// is instantiated once per element type; inside it, `$T` implements
/// [`ElementType`].
///
/// # Example
///
/// ```rust
/// use strata_storage::{with_data_type, DataType};
///
/// fn size_of(data_type: DataType) -> usize {
///     with_data_type!(data_type, T => { std::mem::size_of::<T>() })
/// }
/// assert_eq!(size_of(DataType::Long), 8);
/// ```
#[macro_export]
macro_rules! with_data_type {
    ($data_type:expr, $T:ident => $body:block) => {
        match $data_type {
            $crate::DataType::Int => {
                type $T = i32;
                $body
            }
            $crate::DataType::Long => {
                type $T = i64;
                $body
            }
            $crate::DataType::Float => {
                type $T = f32;
                $body
            }
            $crate::DataType::Double => {
                type $T = f64;
                $body
            }
            $crate::DataType::String => {
                type $T = ::std::string::String;
                $body
            }
        }
    };
}

/// A concrete column element type.
///
/// Implemented exactly for `i32`, `i64`, `f32`, `f64`, and `String`. The
/// trait carries the coercion rules between erased [`Value`]s and typed
/// elements, the total order used for dictionary sorting, and the typed
/// accessors into the erased segment enums.
pub trait ElementType: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// The runtime tag for this element type.
    const DATA_TYPE: DataType;

    /// Coerces an erased value into this element type.
    ///
    /// Numeric values convert freely among numeric element types, with
    /// fractional parts truncating toward zero on integer targets. Strings
    /// only convert to strings. Kind-crossing conversions fail with
    /// [`StrataError::TypeMismatch`].
    fn from_value(value: &Value) -> StrataResult<Self>;

    /// Wraps a typed element into an erased value.
    fn to_value(&self) -> Value;

    /// Total order over elements of this type.
    ///
    /// Integers and strings use their natural order; floats use the IEEE 754
    /// `totalOrder` predicate so that sorting and bound searches stay
    /// deterministic.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Heap bytes owned by this element beyond `size_of::<Self>()`.
    fn heap_size(&self) -> usize {
        0
    }

    /// Typed view of an erased value segment, if the types agree.
    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>>;

    /// Typed view of an erased dictionary segment, if the types agree.
    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>>;

    /// Erases a typed value segment.
    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment;

    /// Erases a typed dictionary segment.
    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment;
}

fn mismatch(expected: DataType, value: &Value) -> StrataError {
    StrataError::TypeMismatch {
        expected,
        actual: value.data_type(),
    }
}

impl ElementType for i32 {
    const DATA_TYPE: DataType = DataType::Int;

    fn from_value(value: &Value) -> StrataResult<Self> {
        value
            .as_i64()
            .map(|v| v as i32)
            .ok_or_else(|| mismatch(Self::DATA_TYPE, value))
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>> {
        match segment {
            AnyValueSegment::Int(inner) => Some(inner),
            _ => None,
        }
    }

    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>> {
        match segment {
            AnyDictionarySegment::Int(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment {
        AnyValueSegment::Int(segment)
    }

    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment {
        AnyDictionarySegment::Int(segment)
    }
}

impl ElementType for i64 {
    const DATA_TYPE: DataType = DataType::Long;

    fn from_value(value: &Value) -> StrataResult<Self> {
        value
            .as_i64()
            .ok_or_else(|| mismatch(Self::DATA_TYPE, value))
    }

    fn to_value(&self) -> Value {
        Value::Long(*self)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>> {
        match segment {
            AnyValueSegment::Long(inner) => Some(inner),
            _ => None,
        }
    }

    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>> {
        match segment {
            AnyDictionarySegment::Long(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment {
        AnyValueSegment::Long(segment)
    }

    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment {
        AnyDictionarySegment::Long(segment)
    }
}

impl ElementType for f32 {
    const DATA_TYPE: DataType = DataType::Float;

    fn from_value(value: &Value) -> StrataResult<Self> {
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| mismatch(Self::DATA_TYPE, value))
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }

    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>> {
        match segment {
            AnyValueSegment::Float(inner) => Some(inner),
            _ => None,
        }
    }

    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>> {
        match segment {
            AnyDictionarySegment::Float(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment {
        AnyValueSegment::Float(segment)
    }

    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment {
        AnyDictionarySegment::Float(segment)
    }
}

impl ElementType for f64 {
    const DATA_TYPE: DataType = DataType::Double;

    fn from_value(value: &Value) -> StrataResult<Self> {
        value
            .as_f64()
            .ok_or_else(|| mismatch(Self::DATA_TYPE, value))
    }

    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>> {
        match segment {
            AnyValueSegment::Double(inner) => Some(inner),
            _ => None,
        }
    }

    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>> {
        match segment {
            AnyDictionarySegment::Double(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment {
        AnyValueSegment::Double(segment)
    }

    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment {
        AnyDictionarySegment::Double(segment)
    }
}

impl ElementType for String {
    const DATA_TYPE: DataType = DataType::String;

    fn from_value(value: &Value) -> StrataResult<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch(Self::DATA_TYPE, value))
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn heap_size(&self) -> usize {
        self.len()
    }

    fn as_value_segment(segment: &AnyValueSegment) -> Option<&ValueSegment<Self>> {
        match segment {
            AnyValueSegment::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn as_dictionary_segment(segment: &AnyDictionarySegment) -> Option<&DictionarySegment<Self>> {
        match segment {
            AnyDictionarySegment::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap_value_segment(segment: ValueSegment<Self>) -> AnyValueSegment {
        AnyValueSegment::String(segment)
    }

    fn wrap_dictionary_segment(segment: DictionarySegment<Self>) -> AnyDictionarySegment {
        AnyDictionarySegment::String(segment)
    }
}
