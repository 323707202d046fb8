//! Core identifier types for Strata.
//!
//! These types provide type-safe wrappers around numeric identifiers,
//! preventing accidental misuse of different ID types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset of a row within a single chunk.
///
/// Kept as a plain integer because it is used pervasively for indexing into
/// segment payloads.
pub type ChunkOffset = u32;

/// Chunk identifier - indexes into a table's ordered chunk sequence.
///
/// # Example
///
/// ```rust
/// use strata_common::types::ChunkId;
///
/// let chunk = ChunkId::new(2);
/// assert_eq!(chunk.as_u32(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ChunkId(u32);

impl ChunkId {
    /// Creates a new `ChunkId` from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the value as an index into a chunk sequence.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the next chunk ID.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({})", self.0)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChunkId {
    #[inline]
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<ChunkId> for u32 {
    #[inline]
    fn from(id: ChunkId) -> Self {
        id.0
    }
}

/// Column identifier - indexes into a table's ordered column metadata.
///
/// # Example
///
/// ```rust
/// use strata_common::types::ColumnId;
///
/// let column = ColumnId::new(1);
/// assert_eq!(column.as_u16(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ColumnId(u16);

impl ColumnId {
    /// Creates a new `ColumnId` from a raw u16 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the value as an index into a column sequence.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId({})", self.0)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ColumnId {
    #[inline]
    fn from(id: u16) -> Self {
        Self::new(id)
    }
}

impl From<ColumnId> for u16 {
    #[inline]
    fn from(id: ColumnId) -> Self {
        id.0
    }
}

/// Index into a dictionary segment's sorted dictionary.
///
/// `ValueId::INVALID` is the sentinel for "no such entry"; it occupies the
/// top value of the 4-byte space, which is why dictionary cardinalities are
/// capped one below each width's numeric maximum.
///
/// # Example
///
/// ```rust
/// use strata_common::types::ValueId;
///
/// let id = ValueId::new(7);
/// assert!(id.is_valid());
/// assert!(!ValueId::INVALID.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    /// Invalid value ID, used as a sentinel for "no such dictionary entry".
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new `ValueId` from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the value as an index into a dictionary.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Checks if this is a valid value ID.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "ValueId(INVALID)")
        } else {
            write!(f, "ValueId({})", self.0)
        }
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ValueId {
    #[inline]
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<ValueId> for u32 {
    #[inline]
    fn from(id: ValueId) -> Self {
        id.0
    }
}

/// Coordinate of a single row inside a table.
///
/// A `RowId` addresses the row at `chunk_offset` within the chunk identified
/// by `chunk_id`. Position lists are sequences of `RowId`s into a base table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId {
    /// Index of the owning chunk in the table's chunk sequence.
    pub chunk_id: ChunkId,
    /// Offset of the row within that chunk.
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    /// Creates a new row coordinate.
    #[inline]
    #[must_use]
    pub const fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        Self {
            chunk_id,
            chunk_offset,
        }
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({}, {})", self.chunk_id, self.chunk_offset)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.chunk_id, self.chunk_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id() {
        let chunk = ChunkId::new(42);
        assert_eq!(chunk.as_u32(), 42);
        assert_eq!(chunk.as_usize(), 42);
        assert_eq!(chunk.next().as_u32(), 43);
    }

    #[test]
    fn test_column_id() {
        let column = ColumnId::new(3);
        assert_eq!(column.as_u16(), 3);
        assert_eq!(u16::from(column), 3);
    }

    #[test]
    fn test_value_id() {
        let id = ValueId::new(100);
        assert!(id.is_valid());
        assert!(!ValueId::INVALID.is_valid());
        assert_eq!(ValueId::INVALID.as_u32(), u32::MAX);
    }

    #[test]
    fn test_row_id() {
        let row = RowId::new(ChunkId::new(1), 7);
        assert_eq!(row.chunk_id, ChunkId::new(1));
        assert_eq!(row.chunk_offset, 7);
        assert_eq!(format!("{}", row), "(1, 7)");
    }

    #[test]
    fn test_ordering() {
        assert!(ChunkId::new(1) < ChunkId::new(2));
        assert!(ColumnId::new(1) < ColumnId::new(2));
        assert!(ValueId::new(1) < ValueId::new(2));
        // The sentinel sorts after every valid id.
        assert!(ValueId::new(u32::MAX - 1) < ValueId::INVALID);
    }
}
