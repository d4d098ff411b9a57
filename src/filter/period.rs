//! Report period selection
//!
//! A patient belongs to a report month when any reportable event falls in
//! it: registration, delivery, a visit, a TD dose, a PNC contact, deworming,
//! a supplement, lab or postpartum log, or a completion date.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};

use super::criteria::{FilterCriteria, RecordFilter, apply_filter};
use crate::algorithm::validation::ValidationError;
use crate::error::Result;
use crate::models::{Patient, SupplementKind};

/// Every reportable event date on a record
pub fn activity_dates(patient: &Patient) -> impl Iterator<Item = NaiveDate> + '_ {
    let singles = [
        patient.created_on(),
        patient.delivery_date,
        patient.date_of_registration,
        patient.deworming_date,
        patient.vit_a_completed_date,
        patient.postpartum_ifa_completed_date,
    ];
    let supplements = SupplementKind::ALL
        .into_iter()
        .flat_map(move |kind| patient.supplement_log(kind).iter().map(|l| l.date));

    singles
        .into_iter()
        .chain(patient.prenatal_visits.iter().map(|v| v.date))
        .chain(patient.pnc_contacts.as_array().iter().copied())
        .chain(patient.td_doses.as_array().iter().copied())
        .chain(supplements)
        .chain(patient.lab_logs.iter().map(|l| l.date))
        .chain(patient.postpartum_logs.iter().map(|l| l.date))
        .flatten()
}

/// Whether any reportable event falls in the given month
#[must_use]
pub fn has_activity_in_month(patient: &Patient, year: i32, month: u32) -> bool {
    activity_dates(patient).any(|d| d.year() == year && d.month() == month)
}

/// Year, optional month and optional barangay of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    /// 1-12; `None` reports the whole year
    pub month: Option<u32>,
    /// Barangay; `None` reports all
    pub locality: Option<String>,
}

impl ReportPeriod {
    /// A report period
    ///
    /// # Errors
    /// `InvalidRange` when the month is outside 1..=12
    pub fn new(year: i32, month: Option<u32>) -> Result<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(ValidationError::invalid_range("month", format!("month {m} is outside 1..=12")).into());
            }
        }
        Ok(Self {
            year,
            month,
            locality: None,
        })
    }

    /// Restrict the report to one barangay; blank names mean all
    #[must_use]
    pub fn with_locality(mut self, locality: Option<String>) -> Self {
        self.locality = locality.filter(|l| !l.trim().is_empty());
        self
    }

    /// Header label, e.g. `January 2024`, or the year alone
    #[must_use]
    pub fn month_label(&self) -> String {
        match self.month.and_then(|m| u8::try_from(m).ok()).and_then(|m| Month::try_from(m).ok()) {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.year.to_string(),
        }
    }

    /// Barangay for the header, `All` when unrestricted
    #[must_use]
    pub fn locality_label(&self) -> &str {
        self.locality.as_deref().unwrap_or("All")
    }

    /// Record filter selecting this period
    #[must_use]
    pub fn to_filter(&self) -> RecordFilter {
        let mut filters = Vec::new();
        match self.month {
            Some(month) => filters.push(RecordFilter::ActivityInMonth { year: self.year, month }),
            None => filters.push(RecordFilter::Any(
                (1..=12)
                    .map(|month| RecordFilter::ActivityInMonth { year: self.year, month })
                    .collect(),
            )),
        }
        if let Some(locality) = &self.locality {
            filters.push(RecordFilter::Barangay(locality.clone()));
        }
        RecordFilter::All(filters)
    }

    /// Whether a patient belongs to the period
    #[must_use]
    pub fn contains(&self, patient: &Patient) -> bool {
        self.to_filter().meets_criteria(patient)
    }

    /// Patients belonging to the period, in input order
    #[must_use]
    pub fn select(&self, patients: &[Patient]) -> Vec<Patient> {
        let selected = apply_filter(patients, &self.to_filter());
        log::info!("Report period {self}: {} of {} patients selected", selected.len(), patients.len());
        selected
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.month_label(), self.locality_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabLog, LabResult, LabTestType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_activity_from_any_source() {
        let mut p = Patient::new("Ana", "Reyes");
        assert!(!has_activity_in_month(&p, 2024, 3));

        p.lab_logs.push(LabLog::new(LabTestType::Hiv, d(2024, 3, 9), LabResult::Negative));
        assert!(has_activity_in_month(&p, 2024, 3));
        assert!(!has_activity_in_month(&p, 2023, 3));

        let mut p = Patient::new("Ana", "Reyes");
        p.created_at = Some("2024-05-02T08:15:00.000Z".to_string());
        p.td_doses.set(4, Some(d(2024, 7, 1)));
        assert!(has_activity_in_month(&p, 2024, 5));
        assert!(has_activity_in_month(&p, 2024, 7));
        assert!(!has_activity_in_month(&p, 2024, 6));
    }

    #[test]
    fn test_period_labels_and_validation() {
        let period = ReportPeriod::new(2024, Some(1)).unwrap();
        assert_eq!(period.month_label(), "January 2024");
        assert_eq!(period.locality_label(), "All");
        let period = period.with_locality(Some("Alangilan".to_string()));
        assert_eq!(period.to_string(), "January 2024 (Alangilan)");
        assert!(ReportPeriod::new(2024, Some(13)).is_err());
        assert_eq!(ReportPeriod::new(2024, None).unwrap().month_label(), "2024");
    }

    #[test]
    fn test_select_by_month_and_locality() {
        let mut a = Patient::new("Ana", "Reyes");
        a.barangay = Some("Alangilan".to_string());
        a.delivery_date = Some(d(2024, 2, 14));
        let mut b = a.clone();
        b.barangay = Some("Bolbok".to_string());
        let mut c = a.clone();
        c.delivery_date = Some(d(2024, 4, 1));

        let patients = [a, b, c];
        let period = ReportPeriod::new(2024, Some(2)).unwrap();
        assert_eq!(period.select(&patients).len(), 2);
        let period = period.with_locality(Some("alangilan".to_string()));
        assert_eq!(period.select(&patients).len(), 1);
        assert_eq!(ReportPeriod::new(2024, None).unwrap().select(&patients).len(), 3);
    }
}
