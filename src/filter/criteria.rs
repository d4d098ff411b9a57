//! Criteria for selecting patient records

use chrono::NaiveDate;

use super::dashboard::is_patient_due;
use super::period::has_activity_in_month;
use crate::models::Patient;

/// Trait for filter criteria that can be applied to entities
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A filter that can be applied to a patient record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Any reportable activity in a calendar month
    ActivityInMonth {
        year: i32,
        /// 1-12
        month: u32,
    },
    /// Barangay, compared case-insensitively
    Barangay(String),
    /// Flagged high-risk by a reviewer
    HighRisk,
    /// Not delivered and no visit in the month of the given date
    DueForVisit(NaiveDate),
    /// First or last name contains the text, case-insensitively
    NameContains(String),
    /// Delivery or pregnancy outcome recorded
    Delivered,
    /// Combine multiple filters with AND logic
    All(Vec<RecordFilter>),
    /// Combine multiple filters with OR logic
    Any(Vec<RecordFilter>),
}

impl FilterCriteria<Patient> for RecordFilter {
    fn meets_criteria(&self, patient: &Patient) -> bool {
        match self {
            Self::ActivityInMonth { year, month } => has_activity_in_month(patient, *year, *month),
            Self::Barangay(name) => patient
                .barangay
                .as_deref()
                .is_some_and(|b| b.trim().eq_ignore_ascii_case(name.trim())),
            Self::HighRisk => patient.is_high_risk,
            Self::DueForVisit(today) => is_patient_due(patient, *today),
            Self::NameContains(text) => {
                let needle = text.trim().to_lowercase();
                patient.last_name.to_lowercase().contains(&needle)
                    || patient.first_name.to_lowercase().contains(&needle)
            }
            Self::Delivered => patient.has_delivered(),
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(patient)),
            Self::Any(filters) => filters.iter().any(|f| f.meets_criteria(patient)),
        }
    }
}

/// Patients meeting a filter, cloned, in input order
#[must_use]
pub fn apply_filter(patients: &[Patient], filter: &RecordFilter) -> Vec<Patient> {
    patients
        .iter()
        .filter(|p| filter.meets_criteria(p))
        .cloned()
        .collect()
}
