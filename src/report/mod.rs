//! Rendering of aggregated indicators into reporting templates

pub mod fhsis;
pub mod layout;

pub use fhsis::{FHSIS_COLUMNS, SECTIONS, render_fhsis};
pub use layout::{Line, LineKind};
