//! A Rust library for maternal and child-health case records with
//! chronology validation, FHSIS indicator aggregation and TCL export.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod report;
pub mod sink;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ExportConfig, ReportConfig};
pub use error::{RegistryError, Result};
pub use models::Patient;

// Validation
pub use algorithm::validation::{Decision, ErrorKind, RecordValidator, ValidationError, finalize};

// Reporting
pub use algorithm::export::{TclLayout, TclRow};
pub use algorithm::indicators::{BandCounts, Indicator, IndicatorEngine, IndicatorReport};
pub use filter::{DashboardSummary, RecordFilter, ReportPeriod};
pub use report::render_fhsis;

// Persistence and output
pub use sink::{Cell, MemorySink, ParquetSink, Table, TabularSink};
pub use store::{InMemoryRepository, JsonDirRepository, PatientRepository, RecordService};

// Arrow types
pub use arrow::record_batch::RecordBatch;
