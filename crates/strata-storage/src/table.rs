//! Schema-carrying sequences of chunks.

use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

use strata_common::constants::{DEFAULT_MAX_CHUNK_SIZE, MIN_MAX_CHUNK_SIZE};
use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkId, ColumnId, DataType, Value};

use crate::chunk::{Chunk, SharedChunk};
use crate::segment::Segment;

/// A named-column, chunked table.
///
/// Columns are horizontally partitioned into chunks of at most
/// `max_chunk_size` rows. The schema freezes once the first row lands;
/// chunks are appended monotonically and individual chunks can be
/// dictionary-compressed in place.
///
/// All mutation serializes through the table's write lock. Readers take the
/// read lock only long enough to clone a [`SharedChunk`] handle; the `Arc`
/// indirection keeps those handles valid across concurrent appends, and
/// chunk replacement under the chunk's own write lock guarantees that
/// readers observe either the pre- or the post-compression form, never a
/// torn mix.
#[derive(Debug)]
pub struct Table {
    max_chunk_size: u32,
    inner: RwLock<TableInner>,
}

#[derive(Debug)]
struct TableInner {
    column_names: Vec<String>,
    column_types: Vec<DataType>,
    chunks: Vec<SharedChunk>,
}

impl TableInner {
    fn row_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.read().len()).sum()
    }
}

impl Table {
    /// Creates an empty table that caps chunks at `max_chunk_size` rows.
    ///
    /// The table starts with one empty chunk.
    ///
    /// # Panics
    ///
    /// Panics if `max_chunk_size` is zero.
    #[must_use]
    pub fn new(max_chunk_size: u32) -> Self {
        assert!(
            max_chunk_size >= MIN_MAX_CHUNK_SIZE,
            "max_chunk_size must be a positive row count"
        );
        Self {
            max_chunk_size,
            inner: RwLock::new(TableInner {
                column_names: Vec::new(),
                column_types: Vec::new(),
                chunks: vec![Arc::new(RwLock::new(Chunk::new()))],
            }),
        }
    }

    /// Adds a column to the schema.
    ///
    /// Also adds an empty value segment of the corresponding type to the
    /// initial chunk.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::SchemaFrozen`] once the table contains rows.
    pub fn add_column(&self, name: impl Into<String>, data_type: DataType) -> StrataResult<()> {
        let name = name.into();
        let mut inner = self.inner.write();
        if inner.row_count() > 0 {
            return Err(StrataError::SchemaFrozen { column: name });
        }

        inner.column_names.push(name);
        inner.column_types.push(data_type);
        for chunk in &inner.chunks {
            chunk.write().add_segment(Segment::value(data_type));
        }
        Ok(())
    }

    /// Appends one row.
    ///
    /// If the last chunk is full, a fresh chunk with empty value segments
    /// for every column is opened first.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if the value count does not match
    /// the schema, or [`StrataError::TypeMismatch`] for kind-crossing
    /// values.
    pub fn append(&self, row: &[Value]) -> StrataResult<()> {
        let mut inner = self.inner.write();
        if row.len() != inner.column_names.len() {
            return Err(StrataError::out_of_range(
                row.len(),
                inner.column_names.len(),
            ));
        }

        let last = inner.chunks.len() - 1;
        let last_is_full = inner.chunks[last].read().len() >= self.max_chunk_size as usize;
        if last_is_full {
            let mut chunk = Chunk::new();
            for data_type in &inner.column_types {
                chunk.add_segment(Segment::value(*data_type));
            }
            inner.chunks.push(Arc::new(RwLock::new(chunk)));
        }

        let last = inner.chunks.len() - 1;
        let result = inner.chunks[last].write().append(row);
        result
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.inner.read().column_names.len()
    }

    /// Returns the total number of rows across all chunks.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.inner.read().row_count()
    }

    /// Returns the number of chunks. Always at least 1.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.inner.read().chunks.len()
    }

    /// Returns the configured chunk capacity in rows.
    #[must_use]
    pub fn max_chunk_size(&self) -> u32 {
        self.max_chunk_size
    }

    /// Resolves a column name to its id.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::UnknownColumn`] if no column carries `name`.
    pub fn column_id_by_name(&self, name: &str) -> StrataResult<ColumnId> {
        self.inner
            .read()
            .column_names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| ColumnId::new(index as u16))
            .ok_or_else(|| StrataError::unknown_column(name))
    }

    /// Returns the ordered column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.inner.read().column_names.clone()
    }

    /// Returns the name of a column.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for unknown column ids.
    pub fn column_name(&self, column_id: ColumnId) -> StrataResult<String> {
        let inner = self.inner.read();
        inner
            .column_names
            .get(column_id.as_usize())
            .cloned()
            .ok_or_else(|| {
                StrataError::out_of_range(column_id.as_usize(), inner.column_names.len())
            })
    }

    /// Returns the element type of a column.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for unknown column ids.
    pub fn column_type(&self, column_id: ColumnId) -> StrataResult<DataType> {
        let inner = self.inner.read();
        inner
            .column_types
            .get(column_id.as_usize())
            .copied()
            .ok_or_else(|| {
                StrataError::out_of_range(column_id.as_usize(), inner.column_types.len())
            })
    }

    /// Returns a stable handle to the chunk at `chunk_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for unknown chunk ids.
    pub fn get_chunk(&self, chunk_id: ChunkId) -> StrataResult<SharedChunk> {
        let inner = self.inner.read();
        inner
            .chunks
            .get(chunk_id.as_usize())
            .cloned()
            .ok_or_else(|| StrataError::out_of_range(chunk_id.as_usize(), inner.chunks.len()))
    }

    /// Appends a pre-built chunk.
    ///
    /// If the table still consists of a single empty chunk, that placeholder
    /// is replaced; otherwise the chunk is appended. Used by operators to
    /// assemble output tables.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] if the chunk's column count does
    /// not match the schema.
    pub fn emplace_chunk(&self, chunk: Chunk) -> StrataResult<()> {
        let mut inner = self.inner.write();
        if chunk.column_count() != inner.column_names.len() {
            return Err(StrataError::out_of_range(
                chunk.column_count(),
                inner.column_names.len(),
            ));
        }

        let replace_placeholder = inner.chunks.len() == 1 && inner.chunks[0].read().is_empty();
        if replace_placeholder {
            inner.chunks[0] = Arc::new(RwLock::new(chunk));
        } else {
            inner.chunks.push(Arc::new(RwLock::new(chunk)));
        }
        Ok(())
    }

    /// Replaces every segment of the chunk at `chunk_id` with its
    /// dictionary-encoded form.
    ///
    /// Columns compress independently in parallel; the chunk is swapped in
    /// one step once all of them finish, so concurrent readers observe
    /// either the uncompressed or the compressed chunk in full.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::OutOfRange`] for unknown chunk ids, and
    /// [`StrataError::UnsupportedEncoding`] if the chunk holds segments that
    /// are not value-encoded.
    pub fn compress_chunk(&self, chunk_id: ChunkId) -> StrataResult<()> {
        let inner = self.inner.write();
        let chunk = inner
            .chunks
            .get(chunk_id.as_usize())
            .cloned()
            .ok_or_else(|| StrataError::out_of_range(chunk_id.as_usize(), inner.chunks.len()))?;

        let guard = chunk.read();
        let source: &Chunk = &guard;
        let compressed = (0..source.column_count())
            .into_par_iter()
            .map(|index| {
                match source.get_segment(ColumnId::new(index as u16))? {
                    Segment::Value(values) => Ok(Segment::Dictionary(values.to_dictionary())),
                    other => Err(StrataError::UnsupportedEncoding {
                        operation: "compress_chunk",
                        encoding: other.encoding(),
                    }),
                }
            })
            .collect::<StrataResult<Vec<Segment>>>()?;
        drop(guard);

        *chunk.write() = Chunk::from_segments(compressed);
        debug!("compressed chunk {chunk_id}");
        Ok(())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table(max_chunk_size: u32) -> Table {
        let table = Table::new(max_chunk_size);
        table.add_column("a", DataType::Int).unwrap();
        table.add_column("b", DataType::String).unwrap();
        table
    }

    fn append_row(table: &Table, a: i32, b: &str) {
        table
            .append(&[Value::Int(a), Value::String(b.into())])
            .unwrap();
    }

    #[test]
    fn test_new_table_has_one_empty_chunk() {
        let table = Table::new(4);
        assert_eq!(table.chunk_count(), 1);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.max_chunk_size(), 4);
    }

    #[test]
    fn test_add_column_populates_initial_chunk() {
        let table = two_column_table(4);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column_name(ColumnId::new(0)).unwrap(), "a");
        assert_eq!(table.column_type(ColumnId::new(1)).unwrap(), DataType::String);

        let chunk = table.get_chunk(ChunkId::new(0)).unwrap();
        assert_eq!(chunk.read().column_count(), 2);
    }

    #[test]
    fn test_schema_freezes_after_first_row() {
        let table = two_column_table(4);
        append_row(&table, 1, "x");

        let err = table.add_column("c", DataType::Int).unwrap_err();
        assert!(matches!(err, StrataError::SchemaFrozen { .. }));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_append_fills_chunks_before_opening_new_ones() {
        let table = two_column_table(2);
        for i in 0..5 {
            append_row(&table, i, "v");
        }

        assert_eq!(table.row_count(), 5);
        assert_eq!(table.chunk_count(), 3);
        for (chunk_id, expected) in [(0, 2), (1, 2), (2, 1)] {
            let chunk = table.get_chunk(ChunkId::new(chunk_id)).unwrap();
            assert_eq!(chunk.read().len(), expected);
        }
    }

    #[test]
    fn test_append_wrong_arity() {
        let table = two_column_table(4);
        assert!(table.append(&[Value::Int(1)]).is_err());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_column_id_by_name() {
        let table = two_column_table(4);
        assert_eq!(table.column_id_by_name("b").unwrap(), ColumnId::new(1));
        assert!(matches!(
            table.column_id_by_name("missing"),
            Err(StrataError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_get_chunk_out_of_range() {
        let table = two_column_table(4);
        assert!(table.get_chunk(ChunkId::new(1)).is_err());
    }

    #[test]
    fn test_compress_chunk() {
        let table = two_column_table(4);
        for (i, b) in [(1, "x"), (2, "y"), (1, "x")] {
            append_row(&table, i, b);
        }

        table.compress_chunk(ChunkId::new(0)).unwrap();

        let chunk = table.get_chunk(ChunkId::new(0)).unwrap();
        let guard = chunk.read();
        for column in 0..guard.column_count() {
            let segment = guard.get_segment(ColumnId::new(column as u16)).unwrap();
            assert_eq!(segment.encoding(), "dictionary");
        }
        assert_eq!(guard.len(), 3);
        assert_eq!(
            guard
                .get_segment(ColumnId::new(1))
                .unwrap()
                .value_at(1)
                .unwrap(),
            Value::String("y".into())
        );
    }

    #[test]
    fn test_compress_chunk_twice_is_unsupported() {
        let table = two_column_table(4);
        append_row(&table, 1, "x");
        table.compress_chunk(ChunkId::new(0)).unwrap();

        let err = table.compress_chunk(ChunkId::new(0)).unwrap_err();
        assert!(matches!(err, StrataError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_append_after_compressing_earlier_chunk() {
        let table = two_column_table(2);
        for i in 0..3 {
            append_row(&table, i, "v");
        }
        table.compress_chunk(ChunkId::new(0)).unwrap();

        // The append targets the last, still uncompressed chunk.
        append_row(&table, 3, "w");
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.chunk_count(), 2);
    }

    #[test]
    fn test_old_chunk_handles_see_compressed_form() {
        let table = two_column_table(4);
        append_row(&table, 1, "x");

        let handle = table.get_chunk(ChunkId::new(0)).unwrap();
        table.compress_chunk(ChunkId::new(0)).unwrap();

        // The handle taken before compression observes the swapped chunk.
        let guard = handle.read();
        assert_eq!(
            guard.get_segment(ColumnId::new(0)).unwrap().encoding(),
            "dictionary"
        );
    }

    #[test]
    fn test_emplace_chunk_replaces_placeholder() {
        let table = two_column_table(4);

        let mut chunk = Chunk::new();
        chunk.add_segment(Segment::value(DataType::Int));
        chunk.add_segment(Segment::value(DataType::String));
        chunk
            .append(&[Value::Int(9), Value::String("z".into())])
            .unwrap();
        table.emplace_chunk(chunk).unwrap();

        assert_eq!(table.chunk_count(), 1);
        assert_eq!(table.row_count(), 1);

        // A second emplaced chunk is appended.
        let mut chunk = Chunk::new();
        chunk.add_segment(Segment::value(DataType::Int));
        chunk.add_segment(Segment::value(DataType::String));
        table
            .emplace_chunk(chunk)
            .unwrap();
        assert_eq!(table.chunk_count(), 2);
    }

    #[test]
    fn test_emplace_chunk_column_count_mismatch() {
        let table = two_column_table(4);
        let mut chunk = Chunk::new();
        chunk.add_segment(Segment::value(DataType::Int));
        assert!(table.emplace_chunk(chunk).is_err());
    }

    #[test]
    fn test_default_chunk_size() {
        let table = Table::default();
        assert_eq!(table.max_chunk_size(), DEFAULT_MAX_CHUNK_SIZE);
    }
}
