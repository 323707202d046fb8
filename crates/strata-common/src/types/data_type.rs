//! The closed set of column element types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical element type of a column.
///
/// The set is closed: every column is created with one of these tags and all
/// subsequent typed operations on the column dispatch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
}

impl DataType {
    /// All supported element types, in declaration order.
    pub const ALL: [DataType; 5] = [
        DataType::Int,
        DataType::Long,
        DataType::Float,
        DataType::Double,
        DataType::String,
    ];

    /// Resolves a case-sensitive type name to its tag.
    ///
    /// Returns `None` for names outside the fixed set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strata_common::types::DataType;
    ///
    /// assert_eq!(DataType::from_name("long"), Some(DataType::Long));
    /// assert_eq!(DataType::from_name("Long"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(DataType::Int),
            "long" => Some(DataType::Long),
            "float" => Some(DataType::Float),
            "double" => Some(DataType::Double),
            "string" => Some(DataType::String),
            _ => None,
        }
    }

    /// Returns the canonical type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }

    /// Returns true for the numeric element types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
