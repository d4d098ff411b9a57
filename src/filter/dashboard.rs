//! Visit scheduling and the dashboard summary

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::models::{Patient, PrenatalVisit};

/// Rows shown in each dashboard list
pub const DASHBOARD_LIST_LEN: usize = 5;

/// Chronologically latest dated visit; the first one wins on equal dates
#[must_use]
pub fn latest_prenatal_visit(visits: &[PrenatalVisit]) -> Option<&PrenatalVisit> {
    visits
        .iter()
        .filter(|v| v.date.is_some())
        .rev()
        .max_by_key(|v| v.date)
}

/// Whether a patient still needs a prenatal visit this month
///
/// False once a delivery or outcome is recorded; otherwise true when there
/// is no dated visit or the latest one falls outside the month of `today`.
#[must_use]
pub fn is_patient_due(patient: &Patient, today: NaiveDate) -> bool {
    if patient.has_delivered() {
        return false;
    }
    match last_visit(patient) {
        Some(last) => last.year() != today.year() || last.month() != today.month(),
        None => true,
    }
}

fn last_visit(patient: &Patient) -> Option<NaiveDate> {
    latest_prenatal_visit(&patient.prenatal_visits).and_then(|v| v.date)
}

/// Counts and short lists for the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub high_risk: usize,
    pub due: usize,
    /// Labels of the most overdue patients: no visit first, then oldest last visit
    pub most_overdue: Vec<String>,
    /// Labels of the most recently updated records
    pub recently_updated: Vec<String>,
}

impl DashboardSummary {
    /// Summarize a patient set as of `today`
    #[must_use]
    pub fn compute(patients: &[Patient], today: NaiveDate) -> Self {
        let due = patients.iter().filter(|p| is_patient_due(p, today)).collect_vec();

        let most_overdue = due
            .iter()
            .sorted_by(|a, b| match (last_visit(a), last_visit(b)) {
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (a, b) => a.cmp(&b),
            })
            .take(DASHBOARD_LIST_LEN)
            .map(|p| p.label())
            .collect();

        let recently_updated = patients
            .iter()
            .sorted_by_key(|p| {
                std::cmp::Reverse(p.updated_at.as_deref().or(p.created_at.as_deref()).map(str::to_owned))
            })
            .take(DASHBOARD_LIST_LEN)
            .map(Patient::label)
            .collect();

        Self {
            total: patients.len(),
            high_risk: patients.iter().filter(|p| p.is_high_risk).count(),
            due: due.len(),
            most_overdue,
            recently_updated,
        }
    }
}
