//! Parquet file sink

use std::path::{Path, PathBuf};
use std::time::Instant;

use parquet::arrow::ArrowWriter;

use super::TabularSink;
use super::arrow::table_to_record_batch;
use super::table::Table;
use crate::error::Result;
use crate::error::util::{ensure_directory, safe_create_file};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Writes each table to `<dir>/<name>.parquet`
#[derive(Debug)]
pub struct ParquetSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ParquetSink {
    /// Sink writing into `dir`, created if missing
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_directory(&dir, "parquet output")?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl TabularSink for ParquetSink {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        let start = Instant::now();
        let path = self.dir.join(format!("{name}.parquet"));
        log_operation_start("Writing parquet file", &path);

        let batch = table_to_record_batch(table)?;
        let file = safe_create_file(&path, "parquet output")?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        log_operation_complete("wrote", &path, table.len(), Some(start.elapsed()));
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Cell;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    #[test]
    fn test_written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ParquetSink::new(dir.path().join("out")).unwrap();

        let mut table = Table::new(["barangay", "total"]);
        table.push_row(vec![Cell::from("Alangilan"), Cell::from(3u32)]).unwrap();
        table.push_row(vec![Cell::from("Bolbok"), Cell::Empty]).unwrap();
        sink.write_table("summary", &table).unwrap();

        let path = &sink.written()[0];
        assert!(path.ends_with("summary.parquet"));
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 2);
    }
}
