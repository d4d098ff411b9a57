//! Record algorithms: derived fields, chronology validation, indicator
//! aggregation and case-list export.

pub mod derived;
pub mod export;
pub mod indicators;
pub mod validation;
