//! The polymorphic per-column, per-chunk storage.
//!
//! Segments form a closed variant over three physical encodings: append-only
//! value arrays, sorted-dictionary-encoded arrays, and reference views into
//! a base table. The value and dictionary encodings are further closed over
//! the element-type set, one enum variant per [`DataType`].

mod attribute;
mod dictionary;
mod reference;
mod value;

pub use attribute::FixedWidthAttributeVector;
pub use dictionary::DictionarySegment;
pub use reference::{PositionList, ReferenceSegment};
pub use value::ValueSegment;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkOffset, DataType, Value};

use crate::element::ElementType;

/// Runs a block with `$inner` bound to the typed segment of whichever
/// element-type variant is active.
macro_rules! for_each_element {
    ($segment:expr, $inner:ident => $body:expr) => {
        match $segment {
            Self::Int($inner) => $body,
            Self::Long($inner) => $body,
            Self::Float($inner) => $body,
            Self::Double($inner) => $body,
            Self::String($inner) => $body,
        }
    };
}

/// A type-erased value segment: one variant per element type.
#[derive(Clone, Debug)]
pub enum AnyValueSegment {
    /// `int` column payload.
    Int(ValueSegment<i32>),
    /// `long` column payload.
    Long(ValueSegment<i64>),
    /// `float` column payload.
    Float(ValueSegment<f32>),
    /// `double` column payload.
    Double(ValueSegment<f64>),
    /// `string` column payload.
    String(ValueSegment<String>),
}

impl AnyValueSegment {
    /// Creates an empty value segment for the given element type.
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        crate::with_data_type!(data_type, T => {
            T::wrap_value_segment(ValueSegment::new())
        })
    }

    /// Returns the element type tag.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Long(_) => DataType::Long,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
            Self::String(_) => DataType::String,
        }
    }

    /// Coerces `value` to the element type and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::TypeMismatch`] for kind-crossing values.
    pub fn append(&mut self, value: &Value) -> StrataResult<()> {
        for_each_element!(self, inner => inner.append(value))
    }

    /// Checks that `value` would be accepted by [`append`](Self::append)
    /// without mutating the segment.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::TypeMismatch`] for kind-crossing values.
    pub fn check_append(&self, value: &Value) -> StrataResult<()> {
        crate::with_data_type!(self.data_type(), T => {
            T::from_value(value).map(|_| ())
        })
    }

    /// Returns the cell at `offset` as an erased [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        for_each_element!(self, inner => inner.value_at(offset))
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        for_each_element!(self, inner => inner.len())
    }

    /// Returns true if the segment holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimated memory footprint in bytes.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        for_each_element!(self, inner => inner.estimate_memory_usage())
    }

    /// Builds the dictionary-encoded form of this segment.
    #[must_use]
    pub fn to_dictionary(&self) -> AnyDictionarySegment {
        match self {
            Self::Int(inner) => {
                AnyDictionarySegment::Int(DictionarySegment::from_value_segment(inner))
            }
            Self::Long(inner) => {
                AnyDictionarySegment::Long(DictionarySegment::from_value_segment(inner))
            }
            Self::Float(inner) => {
                AnyDictionarySegment::Float(DictionarySegment::from_value_segment(inner))
            }
            Self::Double(inner) => {
                AnyDictionarySegment::Double(DictionarySegment::from_value_segment(inner))
            }
            Self::String(inner) => {
                AnyDictionarySegment::String(DictionarySegment::from_value_segment(inner))
            }
        }
    }
}

/// A type-erased dictionary segment: one variant per element type.
#[derive(Clone, Debug)]
pub enum AnyDictionarySegment {
    /// `int` dictionary.
    Int(DictionarySegment<i32>),
    /// `long` dictionary.
    Long(DictionarySegment<i64>),
    /// `float` dictionary.
    Float(DictionarySegment<f32>),
    /// `double` dictionary.
    Double(DictionarySegment<f64>),
    /// `string` dictionary.
    String(DictionarySegment<String>),
}

impl AnyDictionarySegment {
    /// Returns the element type tag.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Long(_) => DataType::Long,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
            Self::String(_) => DataType::String,
        }
    }

    /// Returns the cell at `offset` as an erased [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        for_each_element!(self, inner => inner.value_at(offset))
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        for_each_element!(self, inner => inner.len())
    }

    /// Returns true if the segment holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn unique_values_count(&self) -> usize {
        for_each_element!(self, inner => inner.unique_values_count())
    }

    /// Estimated memory footprint in bytes.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        for_each_element!(self, inner => inner.estimate_memory_usage())
    }
}

/// One column's storage within one chunk: the closed encoding variant.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Append-only uncompressed values.
    Value(AnyValueSegment),
    /// Immutable sorted-dictionary encoding.
    Dictionary(AnyDictionarySegment),
    /// Immutable reference view into a base table.
    Reference(ReferenceSegment),
}

impl Segment {
    /// Creates an empty value-encoded segment for the given element type.
    #[must_use]
    pub fn value(data_type: DataType) -> Self {
        Self::Value(AnyValueSegment::new(data_type))
    }

    /// Returns the encoding name, for diagnostics and errors.
    #[must_use]
    pub fn encoding(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Dictionary(_) => "dictionary",
            Self::Reference(_) => "reference",
        }
    }

    /// Appends a value. Only the value encoding is mutable.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::ImmutableSegment`] for dictionary and
    /// reference segments, or [`StrataError::TypeMismatch`] for
    /// kind-crossing values.
    pub fn append(&mut self, value: &Value) -> StrataResult<()> {
        match self {
            Self::Value(inner) => inner.append(value),
            other => Err(StrataError::ImmutableSegment {
                encoding: other.encoding(),
            }),
        }
    }

    /// Checks that `value` would be accepted by [`append`](Self::append)
    /// without mutating the segment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`append`](Self::append).
    pub fn check_append(&self, value: &Value) -> StrataResult<()> {
        match self {
            Self::Value(inner) => inner.check_append(value),
            other => Err(StrataError::ImmutableSegment {
                encoding: other.encoding(),
            }),
        }
    }

    /// Returns the cell at `offset` as an erased [`Value`].
    ///
    /// For reference segments this resolves through the position list into
    /// the base table.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        match self {
            Self::Value(inner) => inner.value_at(offset),
            Self::Dictionary(inner) => inner.value_at(offset),
            Self::Reference(inner) => inner.value_at(offset),
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Value(inner) => inner.len(),
            Self::Dictionary(inner) => inner.len(),
            Self::Reference(inner) => inner.len(),
        }
    }

    /// Returns true if the segment holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimated memory footprint in bytes.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            Self::Value(inner) => inner.estimate_memory_usage(),
            Self::Dictionary(inner) => inner.estimate_memory_usage(),
            Self::Reference(inner) => inner.estimate_memory_usage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_segment_round_trip() {
        let mut segment = Segment::value(DataType::Long);
        segment.append(&Value::Long(9)).unwrap();
        segment.append(&Value::Int(2)).unwrap();

        assert_eq!(segment.len(), 2);
        assert_eq!(segment.encoding(), "value");
        assert_eq!(segment.value_at(0).unwrap(), Value::Long(9));
        assert_eq!(segment.value_at(1).unwrap(), Value::Long(2));
    }

    #[test]
    fn test_dictionary_is_immutable() {
        let mut segment = Segment::value(DataType::String);
        segment.append(&Value::String("TEST".into())).unwrap();

        let Segment::Value(values) = &segment else {
            unreachable!()
        };
        let mut dictionary = Segment::Dictionary(values.to_dictionary());

        assert_eq!(dictionary.encoding(), "dictionary");
        let err = dictionary.append(&Value::String("POSSIBLE".into())).unwrap_err();
        assert!(matches!(
            err,
            StrataError::ImmutableSegment {
                encoding: "dictionary"
            }
        ));
    }

    #[test]
    fn test_check_append_does_not_mutate() {
        let segment = Segment::value(DataType::Int);
        assert!(segment.check_append(&Value::Int(1)).is_ok());
        assert!(segment.check_append(&Value::String("x".into())).is_err());
        assert_eq!(segment.len(), 0);
    }

    #[test]
    fn test_erased_dictionary_views() {
        let mut values = AnyValueSegment::new(DataType::Int);
        for v in [3, 1, 3] {
            values.append(&Value::Int(v)).unwrap();
        }
        let dictionary = values.to_dictionary();

        assert_eq!(dictionary.data_type(), DataType::Int);
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.unique_values_count(), 2);
        assert_eq!(dictionary.value_at(2).unwrap(), Value::Int(3));
    }
}
