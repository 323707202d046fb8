//! The operator execution contract.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strata_common::error::StrataResult;
use strata_storage::Table;

/// An executable node of an operator tree.
///
/// Operators form a tree via child operators held by the parent. `execute`
/// pulls child results to completion and yields the operator's result table;
/// the result is computed once and cached, so repeated calls return the same
/// table.
pub trait Operator: fmt::Debug {
    /// Runs the operator to completion and returns its result table.
    ///
    /// # Errors
    ///
    /// Propagates any failure from child execution or from this operator's
    /// own evaluation.
    fn execute(&mut self) -> StrataResult<Arc<Table>>;
}

/// The comparison predicate of a table scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanType {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
}

impl ScanType {
    /// Evaluates the predicate against the ordering of a cell value relative
    /// to the search value.
    #[must_use]
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            ScanType::Equals => ordering == Ordering::Equal,
            ScanType::NotEquals => ordering != Ordering::Equal,
            ScanType::LessThan => ordering == Ordering::Less,
            ScanType::LessThanEquals => ordering != Ordering::Greater,
            ScanType::GreaterThan => ordering == Ordering::Greater,
            ScanType::GreaterThanEquals => ordering != Ordering::Less,
        }
    }

    /// Returns the operator symbol, for diagnostics.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            ScanType::Equals => "=",
            ScanType::NotEquals => "!=",
            ScanType::LessThan => "<",
            ScanType::LessThanEquals => "<=",
            ScanType::GreaterThan => ">",
            ScanType::GreaterThanEquals => ">=",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
