//! # strata-storage
//!
//! Chunked column storage for Strata.
//!
//! Tables hold named, typed columns partitioned horizontally into fixed-size
//! chunks. Each column's per-chunk storage is a [`Segment`]: an append-only
//! value array, an immutable sorted-dictionary encoding, or a reference view
//! addressing rows of a base table. The [`StorageManager`] is the named map
//! that query operators resolve tables through.
//!
//! ## Example
//!
//! ```rust
//! use strata_storage::{DataType, Table};
//! use strata_common::types::{ChunkId, Value};
//!
//! let table = Table::new(2);
//! table.add_column("a", DataType::Int).unwrap();
//! table.append(&[Value::Int(1)]).unwrap();
//! table.append(&[Value::Int(2)]).unwrap();
//! table.append(&[Value::Int(3)]).unwrap();
//!
//! assert_eq!(table.chunk_count(), 2);
//! table.compress_chunk(ChunkId::new(0)).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod element;
pub mod manager;
pub mod segment;
pub mod table;

/// Re-exported so that [`with_data_type!`] expansions resolve the tag from
/// any caller.
pub use strata_common::types::DataType;

pub use chunk::{Chunk, SharedChunk};
pub use element::ElementType;
pub use manager::StorageManager;
pub use segment::{
    AnyDictionarySegment, AnyValueSegment, DictionarySegment, FixedWidthAttributeVector,
    PositionList, ReferenceSegment, Segment, ValueSegment,
};
pub use table::Table;
