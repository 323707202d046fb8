//! Encoding-aware predicate evaluation over a table.

use std::sync::Arc;

use tracing::debug;

use strata_common::error::{StrataError, StrataResult};
use strata_common::types::{ChunkId, ChunkOffset, ColumnId, RowId, Value, ValueId};
use strata_storage::{
    with_data_type, AnyDictionarySegment, AnyValueSegment, Chunk, DictionarySegment, ElementType,
    PositionList, ReferenceSegment, Segment, Table, ValueSegment,
};

use crate::operator::{Operator, ScanType};

/// Filters an input table by a single-column comparison predicate.
///
/// The output table carries the input's schema, and its chunks consist
/// exclusively of reference segments addressing the original base table:
/// scanning a table that already holds reference segments resolves through
/// them, so references never chain.
#[derive(Debug)]
pub struct TableScan {
    input: Box<dyn Operator>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: Value,
    output: Option<Arc<Table>>,
}

impl TableScan {
    /// Creates a scan of `column_id <scan_type> search_value` over the
    /// input operator's result.
    #[must_use]
    pub fn new(
        input: Box<dyn Operator>,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: Value,
    ) -> Self {
        Self {
            input,
            column_id,
            scan_type,
            search_value,
            output: None,
        }
    }

    /// The scanned column.
    #[must_use]
    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// The comparison predicate.
    #[must_use]
    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    /// The search value the column is compared against.
    #[must_use]
    pub fn search_value(&self) -> &Value {
        &self.search_value
    }

    fn scan_table(&self, input: &Arc<Table>) -> StrataResult<Table> {
        let output = Table::new(input.max_chunk_size());
        for index in 0..input.column_count() {
            let column_id = ColumnId::new(index as u16);
            output.add_column(input.column_name(column_id)?, input.column_type(column_id)?)?;
        }

        let column_type = input.column_type(self.column_id)?;
        let mut matched = 0usize;
        with_data_type!(column_type, T => {
            let search = T::from_value(&self.search_value)?;
            for index in 0..input.chunk_count() {
                matched += scan_chunk::<T>(
                    input,
                    &output,
                    ChunkId::new(index as u32),
                    self.column_id,
                    self.scan_type,
                    &search,
                )?;
            }
        });
        debug!(
            "scan {} {} {} matched {matched} rows",
            self.column_id, self.scan_type, self.search_value
        );
        Ok(output)
    }
}

impl Operator for TableScan {
    fn execute(&mut self) -> StrataResult<Arc<Table>> {
        if let Some(output) = &self.output {
            return Ok(Arc::clone(output));
        }
        let input = self.input.execute()?;
        let output = Arc::new(self.scan_table(&input)?);
        self.output = Some(Arc::clone(&output));
        Ok(output)
    }
}

/// Scans one input chunk and emplaces a reference-only output chunk for its
/// matches. Returns the number of matched rows.
fn scan_chunk<T: ElementType>(
    input: &Arc<Table>,
    output: &Table,
    chunk_id: ChunkId,
    column_id: ColumnId,
    scan_type: ScanType,
    search: &T,
) -> StrataResult<usize> {
    let chunk = input.get_chunk(chunk_id)?;
    let guard = chunk.read();
    if guard.is_empty() {
        return Ok(0);
    }

    // Collect base-table coordinates of the matching rows. For value and
    // dictionary segments the input chunk itself is the base; a reference
    // segment is resolved through to its own base table so that the output
    // never references another reference segment.
    let (base_table, positions) = match guard.get_segment(column_id)? {
        Segment::Value(segment) => {
            let values = typed_value_segment::<T>(segment)?;
            let positions = values
                .values()
                .iter()
                .enumerate()
                .filter(|(_, value)| scan_type.matches(value.total_cmp(search)))
                .map(|(offset, _)| RowId::new(chunk_id, offset as ChunkOffset))
                .collect();
            (Arc::clone(input), positions)
        }
        Segment::Dictionary(segment) => {
            let dictionary = typed_dictionary_segment::<T>(segment)?;
            let predicate = BoundsPredicate::new(
                scan_type,
                dictionary.lower_bound(search),
                dictionary.upper_bound(search),
            );
            let positions = dictionary
                .attribute_vector()
                .iter()
                .enumerate()
                .filter(|(_, value_id)| predicate.matches(*value_id))
                .map(|(offset, _)| RowId::new(chunk_id, offset as ChunkOffset))
                .collect();
            (Arc::clone(input), positions)
        }
        Segment::Reference(segment) => {
            let mut positions = PositionList::new();
            for (offset, row) in segment.positions().iter().enumerate() {
                let value = T::from_value(&segment.value_at(offset as ChunkOffset)?)?;
                if scan_type.matches(value.total_cmp(search)) {
                    positions.push(*row);
                }
            }
            (Arc::clone(segment.referenced_table()), positions)
        }
    };
    drop(guard);

    // A chunk without matches contributes nothing to the output.
    if positions.is_empty() {
        return Ok(0);
    }

    let matched = positions.len();
    let positions = Arc::new(positions);
    let mut out_chunk = Chunk::new();
    for index in 0..output.column_count() {
        out_chunk.add_segment(Segment::Reference(ReferenceSegment::new(
            Arc::clone(&base_table),
            ColumnId::new(index as u16),
            Arc::clone(&positions),
        )));
    }
    output.emplace_chunk(out_chunk)?;
    Ok(matched)
}

fn typed_value_segment<T: ElementType>(
    segment: &AnyValueSegment,
) -> StrataResult<&ValueSegment<T>> {
    T::as_value_segment(segment).ok_or(StrataError::TypeMismatch {
        expected: T::DATA_TYPE,
        actual: segment.data_type(),
    })
}

fn typed_dictionary_segment<T: ElementType>(
    segment: &AnyDictionarySegment,
) -> StrataResult<&DictionarySegment<T>> {
    T::as_dictionary_segment(segment).ok_or(StrataError::TypeMismatch {
        expected: T::DATA_TYPE,
        actual: segment.data_type(),
    })
}

/// A scan predicate lowered into value-id space.
///
/// Derived from the dictionary's `lower_bound`/`upper_bound` for the search
/// value, so that each row costs one integer comparison instead of a decode.
#[derive(Clone, Copy, Debug)]
struct BoundsPredicate {
    scan_type: ScanType,
    lower: ValueId,
    upper: ValueId,
}

impl BoundsPredicate {
    fn new(scan_type: ScanType, lower: ValueId, upper: ValueId) -> Self {
        Self {
            scan_type,
            lower,
            upper,
        }
    }

    fn matches(&self, value_id: ValueId) -> bool {
        let (k, lower, upper) = (value_id, self.lower, self.upper);
        match self.scan_type {
            ScanType::Equals => {
                lower.is_valid()
                    && if upper.is_valid() {
                        k >= lower && k < upper
                    } else {
                        k >= lower
                    }
            }
            ScanType::NotEquals => {
                !lower.is_valid()
                    || if upper.is_valid() {
                        k < lower || k >= upper
                    } else {
                        k < lower
                    }
            }
            ScanType::LessThan => !lower.is_valid() || k < lower,
            ScanType::LessThanEquals => !upper.is_valid() || k < upper,
            ScanType::GreaterThan => upper.is_valid() && k >= upper,
            ScanType::GreaterThanEquals => lower.is_valid() && k >= lower,
        }
    }
}
