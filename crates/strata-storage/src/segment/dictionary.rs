//! Sorted-dictionary-encoded column chunks.

use std::cmp::Ordering;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkOffset, Value, ValueId};

use crate::element::ElementType;
use crate::segment::attribute::FixedWidthAttributeVector;
use crate::segment::value::ValueSegment;

/// An immutable, dictionary-encoded column chunk of element type `T`.
///
/// Two children: a sorted, deduplicated `dictionary` of the distinct values,
/// and an `attribute_vector` whose `i`-th entry is the dictionary index of
/// row `i`. The sort makes equality and range predicates answerable with
/// integer comparisons against [`lower_bound`](Self::lower_bound) /
/// [`upper_bound`](Self::upper_bound), without decoding rows.
#[derive(Clone, Debug)]
pub struct DictionarySegment<T> {
    dictionary: Vec<T>,
    attribute_vector: FixedWidthAttributeVector,
}

impl<T: ElementType> DictionarySegment<T> {
    /// Builds a dictionary segment from an uncompressed value segment.
    ///
    /// The attribute vector's width is the smallest of 1, 2, or 4 bytes that
    /// fits the distinct-value count.
    #[must_use]
    pub fn from_value_segment(segment: &ValueSegment<T>) -> Self {
        let mut dictionary = segment.values().to_vec();
        dictionary.sort_unstable_by(|a, b| a.total_cmp(b));
        dictionary.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);

        let mut attribute_vector =
            FixedWidthAttributeVector::for_cardinality(dictionary.len(), segment.len());
        for (position, value) in segment.values().iter().enumerate() {
            let index = dictionary.partition_point(|entry| entry.total_cmp(value) == Ordering::Less);
            attribute_vector.set(position as ChunkOffset, ValueId::new(index as u32));
        }

        Self {
            dictionary,
            attribute_vector,
        }
    }

    /// Returns the element at `offset` by resolving its dictionary index.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn get(&self, offset: ChunkOffset) -> StrataResult<&T> {
        if offset as usize >= self.attribute_vector.len() {
            return Err(StrataError::out_of_range(
                offset as usize,
                self.attribute_vector.len(),
            ));
        }
        self.value_by_value_id(self.attribute_vector.get(offset))
    }

    /// Returns the element at `offset` as an erased [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        self.get(offset).map(ElementType::to_value)
    }

    /// Returns the element a value id stands for.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for [`ValueId::INVALID`] or ids
    /// past the dictionary.
    pub fn value_by_value_id(&self, value_id: ValueId) -> StrataResult<&T> {
        self.dictionary
            .get(value_id.as_usize())
            .ok_or_else(|| StrataError::out_of_range(value_id.as_usize(), self.dictionary.len()))
    }

    /// Returns the first value id whose dictionary entry is `>= value`, or
    /// [`ValueId::INVALID`] if every entry is smaller.
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let index = self
            .dictionary
            .partition_point(|entry| entry.total_cmp(value) == Ordering::Less);
        if index >= self.dictionary.len() {
            ValueId::INVALID
        } else {
            ValueId::new(index as u32)
        }
    }

    /// Returns the first value id whose dictionary entry is `> value`, or
    /// [`ValueId::INVALID`] if every entry is smaller or equal.
    #[must_use]
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let index = self
            .dictionary
            .partition_point(|entry| entry.total_cmp(value) != Ordering::Greater);
        if index >= self.dictionary.len() {
            ValueId::INVALID
        } else {
            ValueId::new(index as u32)
        }
    }

    /// Borrows the sorted dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    /// Borrows the attribute vector.
    #[must_use]
    pub fn attribute_vector(&self) -> &FixedWidthAttributeVector {
        &self.attribute_vector
    }

    /// Returns the number of distinct values (dictionary entries).
    #[must_use]
    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    /// Returns true if the segment holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    /// Estimated memory footprint in bytes.
    ///
    /// Counts the dictionary entries (plus string payload bytes) and the
    /// attribute vector at its physical width.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        self.dictionary.len() * std::mem::size_of::<T>()
            + self
                .dictionary
                .iter()
                .map(ElementType::heap_size)
                .sum::<usize>()
            + self.attribute_vector.len() * self.attribute_vector.width()
    }
}
