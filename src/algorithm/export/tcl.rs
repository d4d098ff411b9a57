//! Target client list (TCL) rows
//!
//! One fixed-width row per patient. Variable-length collections are
//! projected into a fixed number of columns: prenatal visit dates sorted
//! ascending (extra visits dropped), the five TD slots by position, the
//! first baby only and the four PNC contacts.

use std::sync::LazyLock;

use itertools::Itertools;
use rayon::prelude::*;

use crate::algorithm::derived::{self, AgeGroup, dose_status};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::models::{LabTestType, Patient, SupplementKind};
use crate::sink::{Cell, Table};

/// Visit date columns in the default layout
pub const DEFAULT_VISIT_COLUMNS: usize = 8;

/// Column names of the default layout, in order
pub static TCL_COLUMNS: LazyLock<Vec<String>> =
    LazyLock::new(|| TclLayout::default().columns());

/// Shape of the exported row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TclLayout {
    /// Number of `visit_N` date columns
    pub visit_columns: usize,
}

impl Default for TclLayout {
    fn default() -> Self {
        Self {
            visit_columns: DEFAULT_VISIT_COLUMNS,
        }
    }
}

impl From<&ExportConfig> for TclLayout {
    fn from(config: &ExportConfig) -> Self {
        Self {
            visit_columns: config.max_visit_columns,
        }
    }
}

/// One exported row
#[derive(Debug, Clone, PartialEq)]
pub struct TclRow {
    fields: Vec<(String, Cell)>,
}

impl TclRow {
    /// Cell for a column name
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, cell)| cell)
    }

    /// `(column, cell)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    /// Row as a JSON object `column_name -> scalar`
    #[must_use]
    pub fn as_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(name, cell)| (name.clone(), serde_json::to_value(cell).unwrap_or_default()))
            .collect()
    }

    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.fields.into_iter().map(|(_, cell)| cell).collect()
    }
}

struct RowBuilder {
    fields: Vec<(String, Cell)>,
}

impl RowBuilder {
    fn push(&mut self, name: impl Into<String>, cell: impl Into<Cell>) {
        self.fields.push((name.into(), cell.into()));
    }
}

fn latest_lab(patient: &Patient, test: LabTestType) -> Cell {
    let structured = patient
        .lab_logs
        .iter()
        .filter(|l| l.test_type == Some(test))
        .filter_map(|l| l.result.map(|r| (l.date, r)))
        .max_by_key(|(date, _)| *date)
        .map(|(_, r)| r.label());
    match structured {
        Some(label) => Cell::from(label),
        None => Cell::from(patient.legacy_lab_result(test)),
    }
}

impl TclLayout {
    /// Column names for this layout, in order
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.build(&Patient::default())
            .fields
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Build the row for one patient
    #[must_use]
    pub fn build(&self, patient: &Patient) -> TclRow {
        let mut row = RowBuilder { fields: Vec::with_capacity(80) };

        row.push("id", patient.id.clone());
        row.push("last_name", patient.last_name.as_str());
        row.push("first_name", patient.first_name.as_str());
        row.push("middle_name", patient.middle_name.clone());
        row.push("age", patient.age);
        row.push("age_group", AgeGroup::from_age(patient.age).map(|g| g.to_string()));
        row.push("barangay", patient.barangay.clone());
        row.push("sitio", patient.sitio.clone());
        row.push("address", patient.address.clone());
        row.push("date_of_registration", patient.date_of_registration);
        row.push("is_high_risk", patient.is_high_risk);
        row.push("high_risk_reason", patient.high_risk_reason.clone());

        row.push("lmp", patient.lmp);
        row.push("edc", patient.edc.or_else(|| derived::estimated_due_date(patient.lmp)));
        row.push("gravida", patient.gravida);
        row.push("parity", patient.parity);
        row.push("aog", patient.aog.clone());
        row.push("trimester", patient.trimester.map(|t| t.label()));
        row.push("height", patient.height);
        row.push("weight", patient.weight);
        row.push("bmi", patient.bmi);
        row.push("bmi_category", patient.bmi_category.map(|c| c.label()));

        let visit_dates = patient
            .prenatal_visits
            .iter()
            .filter_map(|v| v.date)
            .sorted()
            .collect_vec();
        for i in 0..self.visit_columns {
            row.push(format!("visit_{}", i + 1), visit_dates.get(i).copied());
        }

        for (slot, date) in patient.td_doses.as_array().iter().enumerate() {
            row.push(format!("td{}", slot + 1), *date);
        }
        row.push(
            "td_status",
            dose_status(&patient.td_doses, patient.td_completed_previously).count.to_string(),
        );

        for kind in SupplementKind::ALL {
            let total = derived::running_total(patient.supplement_log(kind));
            row.push(format!("{}_total", kind.field_name()), total);
        }
        row.push("calcium_carbonate_completed", patient.calcium_carbonate_completed.normalize());
        row.push("deworming_date", patient.deworming_date);

        for (name, test) in [
            ("lab_syphilis", LabTestType::Syphilis),
            ("lab_hepb", LabTestType::HepatitisB),
            ("lab_hiv", LabTestType::Hiv),
            ("lab_cbc", LabTestType::Cbc),
            ("lab_diabetes", LabTestType::GestationalDiabetes),
        ] {
            row.push(name, latest_lab(patient, test));
        }

        row.push("delivery_date", patient.delivery_date);
        row.push("delivery_outcome", patient.delivery_outcome.map(|o| o.code()));
        row.push("delivery_mode", patient.delivery_mode.map(|m| m.code()));
        row.push("delivery_attendant", patient.delivery_attendant.as_ref().map(ToString::to_string));
        row.push("delivery_facility_type", patient.delivery_facility_type.map(|f| f.label()));
        row.push("delivery_place", patient.delivery_place.clone());
        row.push("pregnancy_type", patient.pregnancy_type.map(|t| t.label()));

        let first_baby = patient.baby_details.first();
        let weight = first_baby.and_then(|b| b.weight).or(patient.birth_weight);
        let category = first_baby
            .and_then(|b| b.category)
            .or(patient.birth_weight_category)
            .or_else(|| derived::birth_weight_category(weight));
        let sex = first_baby.and_then(|b| b.sex).or(patient.birth_sex);
        row.push("birth_weight", weight);
        row.push("birth_weight_category", category.map(|c| c.label()));
        row.push("birth_sex", sex.map(|s| s.label()));

        for (slot, date) in patient.pnc_contacts.as_array().iter().enumerate() {
            row.push(format!("pnc_{}", slot + 1), *date);
        }
        row.push("postpartum_ifa_count", patient.postpartum_ifa_count);
        row.push("postpartum_ifa_completed_date", patient.postpartum_ifa_completed_date);
        row.push("vit_a_completed_date", patient.vit_a_completed_date);
        row.push("pnc_remarks", patient.pnc_remarks.clone());

        TclRow { fields: row.fields }
    }

    /// Rows for every patient, in input order
    #[must_use]
    pub fn build_rows(&self, patients: &[Patient]) -> Vec<TclRow> {
        patients.par_iter().map(|p| self.build(p)).collect()
    }

    /// Rows for every patient as a table
    pub fn build_table(&self, patients: &[Patient]) -> Result<Table> {
        let mut table = Table::new(self.columns());
        for row in self.build_rows(patients) {
            table.push_row(row.into_cells())?;
        }
        log::info!("Built TCL table with {} rows", table.len());
        Ok(table)
    }
}

/// Row for one patient in the default layout
#[must_use]
pub fn build_row(patient: &Patient) -> TclRow {
    TclLayout::default().build(patient)
}

/// Table for a patient set in the default layout
pub fn build_table(patients: &[Patient]) -> Result<Table> {
    TclLayout::default().build_table(patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BabyDetail, BirthWeightCategory, DeliveryOutcome, LabLog, LabResult, PrenatalVisit, Sex,
    };
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let columns = &*TCL_COLUMNS;
        assert_eq!(columns.iter().filter(|c| c.starts_with("visit_")).count(), 8);
        assert!(columns.iter().any(|c| c == "td5"));
        assert!(columns.iter().any(|c| c == "pnc_4"));
        assert!(columns.iter().all_unique());
    }

    #[test]
    fn test_missing_values_are_empty() {
        let row = build_row(&Patient::new("Ana", "Reyes"));
        assert_eq!(row.get("last_name"), Some(&Cell::Text("Reyes".to_string())));
        assert_eq!(row.get("lmp"), Some(&Cell::Empty));
        assert_eq!(row.get("td_status"), Some(&Cell::Text("0".to_string())));
        assert_eq!(row.as_map()["visit_1"], serde_json::Value::Null);
    }

    #[test]
    fn test_visits_are_sorted_and_truncated() {
        let mut p = Patient::new("Ana", "Reyes");
        p.prenatal_visits = (1..=10).rev().map(|m| PrenatalVisit::new(d(m, 1), None, None)).collect();
        let row = build_row(&p);
        assert_eq!(row.get("visit_1"), Some(&Cell::Date(d(1, 1))));
        assert_eq!(row.get("visit_8"), Some(&Cell::Date(d(8, 1))));
        assert_eq!(row.get("visit_9"), None);

        let narrow = TclLayout { visit_columns: 2 }.build(&p);
        assert_eq!(narrow.get("visit_2"), Some(&Cell::Date(d(2, 1))));
        assert_eq!(narrow.get("visit_3"), None);
    }

    #[test]
    fn test_first_baby_and_latest_lab() {
        let mut p = Patient::new("Ana", "Reyes");
        p.delivery_outcome = Some(DeliveryOutcome::FullTerm);
        p.baby_details = vec![
            BabyDetail { weight: Some(2300.0), category: None, sex: Some(Sex::Female) },
            BabyDetail { weight: Some(3300.0), category: Some(BirthWeightCategory::Normal), sex: Some(Sex::Male) },
        ];
        p.lab_logs = vec![
            LabLog::new(LabTestType::Cbc, d(3, 1), LabResult::WithAnemia),
            LabLog::new(LabTestType::Cbc, d(5, 1), LabResult::WithoutAnemia),
        ];
        p.lab_hiv_result = Some("Non-Reactive".to_string());

        let row = build_row(&p);
        assert_eq!(row.get("birth_weight"), Some(&Cell::Number(2300.0)));
        assert_eq!(row.get("birth_weight_category"), Some(&Cell::Text("Low".to_string())));
        assert_eq!(row.get("birth_sex"), Some(&Cell::Text("Female".to_string())));
        assert_eq!(row.get("lab_cbc"), Some(&Cell::Text("Without Anemia".to_string())));
        assert_eq!(row.get("lab_hiv"), Some(&Cell::Text("Non-Reactive".to_string())));
    }
}
