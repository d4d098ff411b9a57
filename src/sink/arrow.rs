//! Conversion of tables to Arrow record batches

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Date32Builder, Float64Builder, Int64Builder, StringBuilder,
};
use arrow::datatypes::{DataType, Date32Type, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::TabularSink;
use super::table::{Cell, Table};
use crate::error::Result;

/// Arrow type a column is written as
///
/// A column whose non-empty cells all share a type keeps it; integers mixed
/// with numbers widen to `Float64`; anything else falls back to `Utf8`.
fn column_type(table: &Table, index: usize) -> DataType {
    let mut kind: Option<DataType> = None;
    for row in table.rows() {
        let cell_type = match &row[index] {
            Cell::Empty => continue,
            Cell::Text(_) => DataType::Utf8,
            Cell::Integer(_) => DataType::Int64,
            Cell::Number(_) => DataType::Float64,
            Cell::Date(_) => DataType::Date32,
            Cell::Bool(_) => DataType::Boolean,
        };
        kind = Some(match (kind, cell_type) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(DataType::Int64 | DataType::Float64), DataType::Int64 | DataType::Float64) => {
                DataType::Float64
            }
            _ => return DataType::Utf8,
        });
    }
    kind.unwrap_or(DataType::Utf8)
}

fn build_column(table: &Table, index: usize, data_type: &DataType) -> ArrayRef {
    let cells = table.rows().iter().map(|row| &row[index]);
    match data_type {
        DataType::Int64 => {
            let mut builder = Int64Builder::new();
            for cell in cells {
                match cell {
                    Cell::Integer(i) => builder.append_value(*i),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::new();
            for cell in cells {
                match cell {
                    Cell::Number(n) => builder.append_value(*n),
                    Cell::Integer(i) => builder.append_value(*i as f64),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Date32 => {
            let mut builder = Date32Builder::new();
            for cell in cells {
                match cell {
                    Cell::Date(d) => builder.append_value(Date32Type::from_naive_date(*d)),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Boolean => {
            let mut builder = BooleanBuilder::new();
            for cell in cells {
                match cell {
                    Cell::Bool(b) => builder.append_value(*b),
                    _ => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
        _ => {
            let mut builder = StringBuilder::new();
            for cell in cells {
                if cell.is_empty() {
                    builder.append_null();
                } else {
                    builder.append_value(cell.to_string());
                }
            }
            Arc::new(builder.finish())
        }
    }
}

/// Convert a table to a single record batch with nullable columns
pub fn table_to_record_batch(table: &Table) -> Result<RecordBatch> {
    let types: Vec<DataType> = (0..table.columns().len()).map(|i| column_type(table, i)).collect();
    let schema = Arc::new(Schema::new(
        table
            .columns()
            .iter()
            .zip(&types)
            .map(|(name, t)| Field::new(name, t.clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = types
        .iter()
        .enumerate()
        .map(|(i, t)| build_column(table, i, t))
        .collect();
    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Sink keeping each table as an Arrow record batch
#[derive(Debug, Default)]
pub struct ArrowSink {
    batches: Vec<(String, RecordBatch)>,
}

impl ArrowSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch written under `name`, most recent first
    #[must_use]
    pub fn batch(&self, name: &str) -> Option<&RecordBatch> {
        self.batches.iter().rev().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    #[must_use]
    pub fn into_batches(self) -> Vec<(String, RecordBatch)> {
        self.batches
    }
}

impl TabularSink for ArrowSink {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        let batch = table_to_record_batch(table)?;
        self.batches.push((name.to_string(), batch));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Date32Array, Float64Array, StringArray};
    use chrono::NaiveDate;

    #[test]
    fn test_column_types_follow_cells() {
        let mut table = Table::new(["name", "visit", "weight", "mixed"]);
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        table
            .push_row(vec![Cell::from("Reyes"), Cell::from(date), Cell::from(1u32), Cell::from(1u32)])
            .unwrap();
        table
            .push_row(vec![Cell::Empty, Cell::Empty, Cell::from(2.5), Cell::from("x")])
            .unwrap();

        let batch = table_to_record_batch(&table).unwrap();
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).data_type(), &DataType::Date32);
        assert_eq!(schema.field(2).data_type(), &DataType::Float64);
        assert_eq!(schema.field(3).data_type(), &DataType::Utf8);

        let names = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
        assert!(names.is_null(1));
        let visits = batch.column(1).as_any().downcast_ref::<Date32Array>().unwrap();
        assert_eq!(visits.value_as_date(0), Some(date));
        let weights = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(weights.value(0), 1.0);
    }

    #[test]
    fn test_sink_keeps_named_batches() {
        let mut sink = ArrowSink::new();
        let table = Table::new(["a"]);
        sink.write_table("tcl", &table).unwrap();
        assert_eq!(sink.batch("tcl").map(RecordBatch::num_rows), Some(0));
        assert!(sink.batch("fhsis").is_none());
    }
}
