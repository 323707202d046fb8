//! Shared fixtures for Strata benchmarks.

#![warn(clippy::all)]

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strata_common::types::Value;
use strata_storage::{DataType, Table};

/// Builds a two-column table of `rows` random rows with the given chunk
/// capacity. Values are drawn from a seeded generator so runs are
/// reproducible.
#[must_use]
pub fn random_table(rows: usize, max_chunk_size: u32, distinct: i32) -> Arc<Table> {
    let mut rng = StdRng::seed_from_u64(42);
    let table = Table::new(max_chunk_size);
    table.add_column("id", DataType::Int).expect("empty table");
    table
        .add_column("label", DataType::String)
        .expect("empty table");

    for _ in 0..rows {
        let id = rng.gen_range(0..distinct);
        let label = format!("label_{:04}", rng.gen_range(0..distinct.min(1000)));
        table
            .append(&[Value::Int(id), Value::String(label)])
            .expect("schema matches");
    }
    Arc::new(table)
}
