//! Zero-copy result segments addressing rows in a base table.

use std::fmt;
use std::sync::Arc;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkOffset, ColumnId, RowId, Value};

use crate::table::Table;

/// Ordered row coordinates into a base table.
///
/// One position list is typically shared by every reference segment of an
/// output chunk, so that a row materialization reads the same coordinate for
/// every output column.
pub type PositionList = Vec<RowId>;

/// A read-through view of one column over selected rows of a base table.
///
/// Reading offset `o` resolves `positions[o]` to a `(chunk_id, chunk_offset)`
/// coordinate and reads `referenced_column_id` of the base table there. The
/// base table must not itself hold reference segments in that column;
/// references never chain (scan output construction enforces this).
#[derive(Clone)]
pub struct ReferenceSegment {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    positions: Arc<PositionList>,
}

impl ReferenceSegment {
    /// Creates a reference segment over `positions` of the given base table
    /// column.
    #[must_use]
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        positions: Arc<PositionList>,
    ) -> Self {
        Self {
            referenced_table,
            referenced_column_id,
            positions,
        }
    }

    /// Reads the cell at `offset` through the position list.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if `offset` is past the position
    /// list, or any error surfaced while resolving the base-table cell.
    pub fn value_at(&self, offset: ChunkOffset) -> StrataResult<Value> {
        let row = self
            .positions
            .get(offset as usize)
            .copied()
            .ok_or_else(|| StrataError::out_of_range(offset as usize, self.positions.len()))?;

        let chunk = self.referenced_table.get_chunk(row.chunk_id)?;
        let guard = chunk.read();
        guard
            .get_segment(self.referenced_column_id)?
            .value_at(row.chunk_offset)
    }

    /// The base table this segment reads from.
    #[must_use]
    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    /// The base-table column this segment reads.
    #[must_use]
    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    /// The shared position list.
    #[must_use]
    pub fn positions(&self) -> &Arc<PositionList> {
        &self.positions
    }

    /// Returns the number of addressed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no rows are addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Estimated memory footprint in bytes: the position list entries.
    #[must_use]
    pub fn estimate_memory_usage(&self) -> usize {
        self.positions.len() * std::mem::size_of::<RowId>()
    }
}

impl fmt::Debug for ReferenceSegment {
    // The base table is elided: printing it would dump every chunk the
    // segment can address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceSegment")
            .field("referenced_column_id", &self.referenced_column_id)
            .field("positions", &self.positions.len())
            .finish()
    }
}
