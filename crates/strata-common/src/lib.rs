//! # strata-common
//!
//! Common types, errors, and constants for the Strata column store.
//!
//! This crate provides the foundational types used across all Strata
//! components. It includes:
//!
//! - **Types**: Core identifiers (`ChunkId`, `ColumnId`, `ValueId`, `RowId`),
//!   the `DataType` tag, and the type-erased `Value` union
//! - **Errors**: Unified error handling with `StrataError`
//! - **Constants**: System-wide constants and limits
//!
//! ## Example
//!
//! ```rust
//! use strata_common::types::{ChunkId, DataType, RowId, Value};
//! use strata_common::error::StrataResult;
//!
//! fn example() -> StrataResult<()> {
//!     let row = RowId::new(ChunkId::new(0), 3);
//!     let value = Value::from(42i32);
//!     assert_eq!(value.data_type(), DataType::Int);
//!     assert_eq!(row.chunk_offset, 3);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use constants::*;
pub use error::{StrataError, StrataResult};
pub use types::{ChunkId, ChunkOffset, ColumnId, DataType, RowId, Value, ValueId};
