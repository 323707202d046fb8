//! End-to-end scan tests.
//!
//! These tests drive the full path from the registry through `GetTable` and
//! `TableScan`, and verify the zero-copy output contract: scan results carry
//! the input schema, consist of reference segments only, and always address
//! the original base table.

use std::sync::Arc;

use strata_common::error::StrataError;
use strata_common::types::{ChunkId, ColumnId, Value};
use strata_query::{GetTable, Operator, ScanType, TableScan};
use strata_storage::{DataType, Segment, StorageManager, Table};

/// Builds the shared fixture: columns `(a: int, b: string)`, chunk size 4,
/// rows `(1,"x"), (2,"y"), (3,"x"), (4,"y"), (5,"x")`.
fn example_table() -> Arc<Table> {
    let table = Table::new(4);
    table.add_column("a", DataType::Int).unwrap();
    table.add_column("b", DataType::String).unwrap();
    for (a, b) in [(1, "x"), (2, "y"), (3, "x"), (4, "y"), (5, "x")] {
        table
            .append(&[Value::Int(a), Value::String(b.into())])
            .unwrap();
    }
    Arc::new(table)
}

fn registered(manager: &Arc<StorageManager>, table: Arc<Table>) -> GetTable {
    manager.add_table("example", table).unwrap();
    GetTable::with_manager(Arc::clone(manager), "example")
}

/// Materializes every row of a table by reading each cell through its
/// segment.
fn collect_rows(table: &Table) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    for chunk_index in 0..table.chunk_count() {
        let chunk = table.get_chunk(ChunkId::new(chunk_index as u32)).unwrap();
        let guard = chunk.read();
        for offset in 0..guard.len() {
            let mut row = Vec::with_capacity(guard.column_count());
            for column in 0..guard.column_count() {
                let segment = guard.get_segment(ColumnId::new(column as u16)).unwrap();
                row.push(segment.value_at(offset as u32).unwrap());
            }
            rows.push(row);
        }
    }
    rows
}

fn assert_reference_only(table: &Table, base: &Arc<Table>) {
    for chunk_index in 0..table.chunk_count() {
        let chunk = table.get_chunk(ChunkId::new(chunk_index as u32)).unwrap();
        let guard = chunk.read();
        for column in 0..guard.column_count() {
            let segment = guard.get_segment(ColumnId::new(column as u16)).unwrap();
            let Segment::Reference(reference) = segment else {
                panic!("scan output must consist of reference segments");
            };
            assert!(
                Arc::ptr_eq(reference.referenced_table(), base),
                "reference segments must address the base table"
            );
            assert_eq!(reference.referenced_column_id(), ColumnId::new(column as u16));
        }
    }
}

fn row(a: i32, b: &str) -> Vec<Value> {
    vec![Value::Int(a), Value::String(b.into())]
}

#[test]
fn test_scan_value_segments() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::GreaterThan,
        Value::Int(2),
    );
    let result = scan.execute().unwrap();

    assert_eq!(result.column_names(), vec!["a", "b"]);
    assert_eq!(result.chunk_count(), 2);
    assert_eq!(result.row_count(), 3);

    let chunk_sizes: Vec<usize> = (0..result.chunk_count())
        .map(|i| result.get_chunk(ChunkId::new(i as u32)).unwrap().read().len())
        .collect();
    assert_eq!(chunk_sizes, vec![2, 1]);

    assert_eq!(
        collect_rows(&result),
        vec![row(3, "x"), row(4, "y"), row(5, "x")]
    );
    assert_reference_only(&result, &base);
}

#[test]
fn test_scan_dictionary_segments() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    base.compress_chunk(ChunkId::new(0)).unwrap();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::Equals,
        Value::Int(2),
    );
    let result = scan.execute().unwrap();

    assert_eq!(result.row_count(), 1);
    assert_eq!(collect_rows(&result), vec![row(2, "y")]);
    assert_reference_only(&result, &base);
}

#[test]
fn test_scan_mixed_encodings() {
    // Chunk 0 compressed, chunk 1 still value-encoded.
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    base.compress_chunk(ChunkId::new(0)).unwrap();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(1),
        ScanType::Equals,
        Value::String("x".into()),
    );
    let result = scan.execute().unwrap();

    assert_eq!(
        collect_rows(&result),
        vec![row(1, "x"), row(3, "x"), row(5, "x")]
    );
    assert_reference_only(&result, &base);
}

#[test]
fn test_scan_over_scan_resolves_to_base_table() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let first = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::GreaterThan,
        Value::Int(2),
    );
    let mut second = TableScan::new(
        Box::new(first),
        ColumnId::new(1),
        ScanType::Equals,
        Value::String("x".into()),
    );
    let result = second.execute().unwrap();

    assert_eq!(collect_rows(&result), vec![row(3, "x"), row(5, "x")]);

    // The second scan's references must point at the original base table,
    // not at the intermediate scan result.
    assert_reference_only(&result, &base);
}

#[test]
fn test_scan_without_matches_keeps_one_empty_chunk() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::GreaterThan,
        Value::Int(100),
    );
    let result = scan.execute().unwrap();

    assert_eq!(result.row_count(), 0);
    assert_eq!(result.chunk_count(), 1);
    assert_eq!(result.column_count(), 2);
}

#[test]
fn test_scan_not_equals_across_chunks() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    base.compress_chunk(ChunkId::new(0)).unwrap();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::NotEquals,
        Value::Int(3),
    );
    let result = scan.execute().unwrap();

    assert_eq!(
        collect_rows(&result),
        vec![row(1, "x"), row(2, "y"), row(4, "y"), row(5, "x")]
    );
}

#[test]
fn test_scan_search_value_coercion() {
    // A long search value against an int column widens instead of failing.
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::LessThanEquals,
        Value::Long(2),
    );
    assert_eq!(scan.execute().unwrap().row_count(), 2);
}

#[test]
fn test_scan_incompatible_search_value() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::Equals,
        Value::String("2".into()),
    );
    assert!(matches!(
        scan.execute(),
        Err(StrataError::TypeMismatch { .. })
    ));
}

#[test]
fn test_scan_result_reads_post_compression_state() {
    // Compressing the base after the scan must not break materialization:
    // reference segments read whichever encoding the base chunk has now.
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::GreaterThanEquals,
        Value::Int(4),
    );
    let result = scan.execute().unwrap();

    base.compress_chunk(ChunkId::new(0)).unwrap();
    assert_eq!(collect_rows(&result), vec![row(4, "y"), row(5, "x")]);
}

#[test]
fn test_get_table_missing_name() {
    let manager = Arc::new(StorageManager::new());
    let mut operator = GetTable::with_manager(manager, "absent");
    assert!(matches!(
        operator.execute(),
        Err(StrataError::UnknownTable { .. })
    ));
}

#[test]
fn test_execute_twice_returns_cached_result() {
    let manager = Arc::new(StorageManager::new());
    let base = example_table();
    let source = registered(&manager, Arc::clone(&base));

    let mut scan = TableScan::new(
        Box::new(source),
        ColumnId::new(0),
        ScanType::GreaterThan,
        Value::Int(0),
    );
    let first = scan.execute().unwrap();
    let second = scan.execute().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
