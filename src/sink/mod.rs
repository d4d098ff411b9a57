//! Tabular output
//!
//! Report builders produce a [`Table`] of typed [`Cell`]s; a [`TabularSink`]
//! decides where it ends up: in memory, as an Arrow record batch or as a
//! Parquet file.

pub mod arrow;
pub mod parquet;
pub mod table;

pub use self::arrow::{ArrowSink, table_to_record_batch};
pub use self::parquet::ParquetSink;
pub use table::{Cell, Table};

use crate::error::Result;

/// Destination for named tables
pub trait TabularSink {
    /// Write one table under a name
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()>;
}

/// Sink keeping copies of the written tables
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Vec<(String, Table)>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table written under `name`, most recent first
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().rev().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TabularSink for MemorySink {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        self.tables.push((name.to_string(), table.clone()));
        Ok(())
    }
}
