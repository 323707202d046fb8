//! Horizontal table partitions.

use parking_lot::RwLock;
use std::sync::Arc;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ColumnId, Value};

use crate::segment::Segment;

/// A chunk handle shared between its table and readers.
///
/// The `Arc` indirection keeps chunk pointers stable while the table grows;
/// the lock makes in-place replacement (dictionary compression) atomic for
/// readers.
pub type SharedChunk = Arc<RwLock<Chunk>>;

/// An ordered tuple of segments, one per column, all of equal length.
#[derive(Debug, Default)]
pub struct Chunk {
    segments: Vec<Segment>,
}

impl Chunk {
    /// Creates an empty chunk with no segments.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates a chunk from pre-built segments.
    ///
    /// Used for compressed replacements and scan output chunks. All segments
    /// must already be of equal length.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        debug_assert!(
            segments.windows(2).all(|w| w[0].len() == w[1].len()),
            "segments of a chunk must have equal lengths"
        );
        Self { segments }
    }

    /// Appends a segment as a new column.
    ///
    /// Only valid during column creation or output assembly; the new
    /// segment's length must match the chunk's current length.
    pub fn add_segment(&mut self, segment: Segment) {
        debug_assert!(
            self.segments.is_empty() || segment.len() == self.len(),
            "segment length must match the chunk"
        );
        self.segments.push(segment);
    }

    /// Appends one row, one value per segment.
    ///
    /// Validation happens before any segment is touched, so a failed append
    /// leaves the chunk unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if the value count does not match
    /// the column count, [`StrataError::TypeMismatch`] for kind-crossing
    /// values, and [`StrataError::ImmutableSegment`] if any column is no
    /// longer value-encoded.
    pub fn append(&mut self, values: &[Value]) -> StrataResult<()> {
        if values.len() != self.segments.len() {
            return Err(StrataError::out_of_range(
                values.len(),
                self.segments.len(),
            ));
        }
        for (segment, value) in self.segments.iter().zip(values) {
            segment.check_append(value)?;
        }
        for (segment, value) in self.segments.iter_mut().zip(values) {
            segment.append(value)?;
        }
        Ok(())
    }

    /// Returns the segment storing the given column.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for unknown column ids.
    pub fn get_segment(&self, column_id: ColumnId) -> StrataResult<&Segment> {
        self.segments
            .get(column_id.as_usize())
            .ok_or_else(|| StrataError::out_of_range(column_id.as_usize(), self.segments.len()))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of rows (0 for a chunk with no segments).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.first().map_or(0, Segment::len)
    }

    /// Returns true if the chunk holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimated memory footprint in bytes, summed over all segments.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        self.segments
            .iter()
            .map(Segment::estimate_memory_usage)
            .sum()
    }
}
