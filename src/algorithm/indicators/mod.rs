//! FHSIS indicator aggregation
//!
//! Every patient contributes independently to a fixed set of indicators,
//! each stratified by the reporting age bands 10-14, 15-19 and 20-49 plus a
//! total. [`IndicatorEngine`] folds those contributions into an
//! [`IndicatorReport`].

pub mod counts;
pub mod engine;
pub mod indicator;
pub mod rules;

pub use counts::{BandCounts, IndicatorReport};
pub use engine::{IndicatorEngine, aggregate};
pub use indicator::Indicator;
pub use rules::{PatientContribution, evaluate_patient};
