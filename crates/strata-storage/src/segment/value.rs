//! Append-only typed column chunks.

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkOffset, Value};

use crate::element::ElementType;

/// An append-only, uncompressed column chunk of element type `T`.
///
/// This is the ingest encoding: rows land here first and stay until the
/// owning chunk is dictionary-compressed.
#[derive(Clone, Debug, Default)]
pub struct ValueSegment<T> {
    values: Vec<T>,
}

impl<T: ElementType> ValueSegment<T> {
    /// Creates an empty value segment.
    #[must_use]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates an empty value segment with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Coerces `value` to `T` and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::TypeMismatch`] if the value's kind is
    /// incompatible with `T`.
    pub fn append(&mut self, value: &Value) -> StrataResult<()> {
        self.values.push(T::from_value(value)?);
        Ok(())
    }

    /// Returns the element at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn get(&self, offset: ChunkOffset) -> StrataResult<&T> {
        self.values
            .get(offset as usize)
            .ok_or_else(|| StrataError::out_of_range(offset as usize, self.values.len()))
    }

    /// Returns the element at `offset` as an erased [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the end.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        self.get(offset).map(ElementType::to_value)
    }

    /// Borrows the underlying typed payload.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the number of appended rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no rows have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Estimated memory footprint in bytes.
    ///
    /// Counts `len * size_of::<T>()` plus, for strings, the payload bytes
    /// owned on the heap.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        self.values.len() * std::mem::size_of::<T>()
            + self.values.iter().map(ElementType::heap_size).sum::<usize>()
    }
}
