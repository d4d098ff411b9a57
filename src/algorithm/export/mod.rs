//! Case-list export

pub mod tcl;

pub use tcl::{DEFAULT_VISIT_COLUMNS, TCL_COLUMNS, TclLayout, TclRow, build_row, build_table};
