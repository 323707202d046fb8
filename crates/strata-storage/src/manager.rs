//! The named-table registry.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use tracing::debug;

use strata_common::error::{StrataError, StrataResult};

use crate::table::Table;

/// A registry mapping names to shared tables.
///
/// The registry is an explicit value so tests and embedders can run isolated
/// instances; [`StorageManager::global`] exposes the conventional
/// process-wide handle. Duplicate names are rejected, and
/// [`table_names`](Self::table_names) lists in lexicographic order.
#[derive(Debug, Default)]
pub struct StorageManager {
    tables: RwLock<BTreeMap<String, Arc<Table>>>,
}

impl StorageManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> Arc<StorageManager> {
        static GLOBAL: Lazy<Arc<StorageManager>> = Lazy::new(Arc::default);
        Arc::clone(&GLOBAL)
    }

    /// Registers a table under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::TableExists`] if the name is already taken.
    pub fn add_table(&self, name: impl Into<String>, table: Arc<Table>) -> StrataResult<()> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(StrataError::TableExists { name });
        }
        debug!("registered table '{name}'");
        tables.insert(name, table);
        Ok(())
    }

    /// Removes the table registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::UnknownTable`] if no table carries `name`.
    pub fn drop_table(&self, name: &str) -> StrataResult<()> {
        let mut tables = self.tables.write();
        tables
            .remove(name)
            .map(|_| debug!("dropped table '{name}'"))
            .ok_or_else(|| StrataError::unknown_table(name))
    }

    /// Returns the table registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::UnknownTable`] if no table carries `name`.
    pub fn get_table(&self, name: &str) -> StrataResult<Arc<Table>> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StrataError::unknown_table(name))
    }

    /// Checks whether a table is registered under `name`.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Lists all registered names in lexicographic order.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    /// Returns the number of registered tables.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    /// Writes one line per table: `name, column_count, row_count,
    /// chunk_count`, in lexicographic name order.
    ///
    /// # Errors
    ///
    /// Propagates writer failures.
    pub fn print<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for (name, table) in self.tables.read().iter() {
            writeln!(
                out,
                "{}, {}, {}, {}",
                name,
                table.column_count(),
                table.row_count(),
                table.chunk_count()
            )?;
        }
        Ok(())
    }

    /// Drops every registered table. Intended for test isolation.
    pub fn reset(&self) {
        self.tables.write().clear();
    }
}
