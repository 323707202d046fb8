//! Width-adaptive attribute vectors for dictionary segments.

use strata_common::constants::{MAX_CARDINALITY_1_BYTE, MAX_CARDINALITY_2_BYTES};
use strata_common::types::{ChunkOffset, ValueId};

/// A dense vector of dictionary indices stored at the smallest physical
/// width that fits the dictionary cardinality.
///
/// Logically this is a `u32` sequence; physically each entry occupies 1, 2,
/// or 4 bytes. `set` is an assignment (never an insertion), so the vector's
/// length is fixed at construction and indices align one-to-one with row
/// positions.
#[derive(Clone, Debug)]
pub enum FixedWidthAttributeVector {
    /// 1-byte entries, for cardinalities up to 255.
    U8(Vec<u8>),
    /// 2-byte entries, for cardinalities up to 65 535.
    U16(Vec<u16>),
    /// 4-byte entries, for everything larger.
    U32(Vec<u32>),
}

impl FixedWidthAttributeVector {
    /// Allocates `len` zeroed entries at the smallest width that can
    /// represent `cardinality` distinct value ids.
    ///
    /// The boundary is strict: the sentinel [`ValueId::INVALID`] must remain
    /// distinguishable at the chosen width, so each width tops out one below
    /// its numeric maximum.
    #[must_use]
    pub fn for_cardinality(cardinality: usize, len: usize) -> Self {
        if cardinality <= MAX_CARDINALITY_1_BYTE {
            Self::U8(vec![0; len])
        } else if cardinality <= MAX_CARDINALITY_2_BYTES {
            Self::U16(vec![0; len])
        } else {
            Self::U32(vec![0; len])
        }
    }

    /// Returns the value id at `offset`, widened to the full 4-byte space.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the vector.
    #[must_use]
    pub fn get(&self, offset: ChunkOffset) -> ValueId {
        let offset = offset as usize;
        match self {
            Self::U8(entries) => ValueId::new(u32::from(entries[offset])),
            Self::U16(entries) => ValueId::new(u32::from(entries[offset])),
            Self::U32(entries) => ValueId::new(entries[offset]),
        }
    }

    /// Assigns the entry at `offset`.
    ///
    /// The caller must only pass value ids that fit the physical width; any
    /// narrowing happens implicitly.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the vector.
    pub fn set(&mut self, offset: ChunkOffset, value_id: ValueId) {
        let offset = offset as usize;
        match self {
            Self::U8(entries) => entries[offset] = value_id.as_u32() as u8,
            Self::U16(entries) => entries[offset] = value_id.as_u32() as u16,
            Self::U32(entries) => entries[offset] = value_id.as_u32(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(entries) => entries.len(),
            Self::U16(entries) => entries.len(),
            Self::U32(entries) => entries.len(),
        }
    }

    /// Returns true if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the physical entry width in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
        }
    }

    /// Iterates all entries in position order, widened to value ids.
    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        (0..self.len()).map(|offset| self.get(offset as ChunkOffset))
    }
}
