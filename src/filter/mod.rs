//! Caller-side selection of patient records
//!
//! Reports run over a pre-filtered patient set. This module provides the
//! report period selection, composable record criteria and the visit
//! scheduling helpers behind the dashboard.

pub mod criteria;
pub mod dashboard;
pub mod period;

pub use criteria::{FilterCriteria, RecordFilter, apply_filter};
pub use dashboard::{DashboardSummary, is_patient_due, latest_prenatal_visit};
pub use period::{ReportPeriod, activity_dates, has_activity_in_month};
