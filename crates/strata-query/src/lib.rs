//! # strata-query
//!
//! The operator algebra over Strata tables.
//!
//! Operators form trees executed to completion: [`GetTable`] resolves a
//! registered table, [`TableScan`] filters its input by a single-column
//! predicate and materializes a zero-copy result of reference segments.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use strata_common::types::{ColumnId, Value};
//! use strata_storage::{DataType, StorageManager, Table};
//! use strata_query::{GetTable, Operator, ScanType, TableScan};
//!
//! let manager = Arc::new(StorageManager::new());
//! let table = Arc::new(Table::new(4));
//! table.add_column("a", DataType::Int).unwrap();
//! table.append(&[Value::Int(1)]).unwrap();
//! table.append(&[Value::Int(5)]).unwrap();
//! manager.add_table("numbers", table).unwrap();
//!
//! let source = GetTable::with_manager(manager, "numbers");
//! let mut scan = TableScan::new(
//!     Box::new(source),
//!     ColumnId::new(0),
//!     ScanType::GreaterThan,
//!     Value::Int(2),
//! );
//! assert_eq!(scan.execute().unwrap().row_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod get_table;
pub mod operator;
pub mod table_scan;

pub use get_table::GetTable;
pub use operator::{Operator, ScanType};
pub use table_scan::TableScan;
