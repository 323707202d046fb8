//! Type definitions for Strata.
//!
//! This module contains all core type definitions used across the column
//! store.

mod data_type;
mod ids;
mod value;

pub use data_type::DataType;
pub use ids::{ChunkId, ChunkOffset, ColumnId, RowId, ValueId};
pub use value::Value;
