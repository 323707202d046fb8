//! The table-producing leaf operator.

use std::sync::Arc;

use strata_common::error::StrataResult;
use strata_storage::{StorageManager, Table};

use crate::operator::Operator;

/// Resolves a named table from a storage manager.
///
/// This is the leaf of every operator tree: it produces the registered table
/// itself, without copying.
#[derive(Debug)]
pub struct GetTable {
    manager: Arc<StorageManager>,
    table_name: String,
    output: Option<Arc<Table>>,
}

impl GetTable {
    /// Creates an operator resolving `table_name` from the process-wide
    /// registry.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self::with_manager(StorageManager::global(), table_name)
    }

    /// Creates an operator resolving `table_name` from an explicit registry
    /// handle.
    #[must_use]
    pub fn with_manager(manager: Arc<StorageManager>, table_name: impl Into<String>) -> Self {
        Self {
            manager,
            table_name: table_name.into(),
            output: None,
        }
    }

    /// The name this operator resolves.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Operator for GetTable {
    fn execute(&mut self) -> StrataResult<Arc<Table>> {
        if let Some(output) = &self.output {
            return Ok(Arc::clone(output));
        }
        let table = self.manager.get_table(&self.table_name)?;
        self.output = Some(Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_common::error::StrataError;

    #[test]
    fn test_resolves_registered_table() {
        let manager = Arc::new(StorageManager::new());
        let table = Arc::new(Table::default());
        manager.add_table("users", Arc::clone(&table)).unwrap();

        let mut operator = GetTable::with_manager(manager, "users");
        assert_eq!(operator.table_name(), "users");

        let result = operator.execute().unwrap();
        assert!(Arc::ptr_eq(&result, &table));
    }

    #[test]
    fn test_unknown_table() {
        let manager = Arc::new(StorageManager::new());
        let mut operator = GetTable::with_manager(manager, "missing");
        assert!(matches!(
            operator.execute(),
            Err(StrataError::UnknownTable { .. })
        ));
    }

    #[test]
    fn test_execute_is_cached() {
        let manager = Arc::new(StorageManager::new());
        manager
            .add_table("users", Arc::new(Table::default()))
            .unwrap();

        let mut operator = GetTable::with_manager(Arc::clone(&manager), "users");
        let first = operator.execute().unwrap();

        // Even after the registry drops the table, the operator result holds.
        manager.drop_table("users").unwrap();
        let second = operator.execute().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
