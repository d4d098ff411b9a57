//! Whole-record checks and preparation for persistence

use chrono::NaiveDate;
use itertools::Itertools;

use super::sequence::{Collection, SequenceRule, is_strictly_increasing};
use super::ValidationError;
use crate::algorithm::derived::{self, POSTPARTUM_IFA_GOAL, expected_baby_count};
use crate::error::{RegistryError, Result};
use crate::filter::latest_prenatal_visit;
use crate::models::{CompletionFlag, FacilityType, Patient};

/// Form-level required fields
///
/// # Returns
/// One `MissingRequiredField` error per missing field, in form order
#[must_use]
pub fn required_fields(patient: &Patient) -> Vec<ValidationError> {
    let blank = |s: &str| s.trim().is_empty();
    let checks = [
        ("last_name", "Last name", blank(&patient.last_name)),
        ("first_name", "First name", blank(&patient.first_name)),
        ("age", "Age", patient.age.is_none()),
        ("barangay", "Barangay", patient.barangay.as_deref().is_none_or(blank)),
        ("address", "Address", patient.address.as_deref().is_none_or(blank)),
        ("lmp", "LMP", patient.lmp.is_none()),
        ("gravida", "Gravida", patient.gravida.is_none()),
        ("parity", "Parity", patient.parity.is_none()),
    ];
    checks
        .into_iter()
        .filter(|(_, _, missing)| *missing)
        .map(|(field, label, _)| ValidationError::missing(field, format!("{label} is required")))
        .collect()
}

fn dates_of(patient: &Patient, collection: Collection) -> Vec<Option<NaiveDate>> {
    match collection {
        Collection::PrenatalVisits => patient.prenatal_visits.iter().map(|v| v.date).collect(),
        Collection::Supplements(kind) => patient.supplement_log(kind).iter().map(|l| l.date).collect(),
        Collection::LabLogs => patient.lab_logs.iter().map(|l| l.date).collect(),
        Collection::PostpartumLogs => patient.postpartum_logs.iter().map(|l| l.date).collect(),
        Collection::TdDoses => patient.td_doses.as_array().to_vec(),
        Collection::PncContacts => patient.pnc_contacts.as_array().to_vec(),
    }
}

/// Check the ordering and derived-field invariants of a whole record
///
/// Used for records that did not arrive through [`super::RecordValidator`],
/// such as imports.
pub fn check_invariants(patient: &Patient) -> std::result::Result<(), ValidationError> {
    for collection in Collection::ORDERED {
        let dates = dates_of(patient, collection);
        if !is_strictly_increasing(dates.iter().copied()) {
            let conflict = dates
                .iter()
                .flatten()
                .tuple_windows()
                .find(|(a, b)| b <= a)
                .map(|(a, _)| *a);
            let kind = match collection.rule() {
                Some(SequenceRule::Positional) => "slots",
                _ => "entries",
            };
            let message = format!("{} {kind} are not in strictly increasing date order", collection.field_name());
            return Err(match conflict {
                Some(date) => ValidationError::out_of_order(collection.field_name(), date, message),
                None => ValidationError::invalid_range(collection.field_name(), message),
            });
        }
    }

    if let Some((i, _)) = patient
        .prenatal_visits
        .iter()
        .find_position(|v| v.bmi_category.is_some() && (v.weight.is_none() || v.height.is_none()))
    {
        return Err(ValidationError::invalid_range(
            "bmi_category",
            format!("Visit {i} has a BMI category without both weight and height"),
        ));
    }

    if !patient.baby_details.is_empty() && !patient.is_live_birth() {
        return Err(ValidationError::invalid_range(
            "baby_details",
            "Baby details are only kept for live births",
        ));
    }
    Ok(())
}

/// Prepare an accepted draft for persistence
///
/// Runs the required-field and invariant checks, then fills the summary
/// fields: due date, latest anthropometrics, postpartum totals, completion
/// flags and live-birth-only baby details.
pub fn finalize(patient: &mut Patient) -> Result<()> {
    let missing = required_fields(patient);
    if !missing.is_empty() {
        return Err(RegistryError::ValidationErrors(missing));
    }

    if !patient.is_live_birth() {
        patient.baby_details.clear();
    }
    check_invariants(patient)?;

    let total = derived::running_total(&patient.postpartum_logs).ok_or_else(|| {
        ValidationError::invalid_range("postpartum_logs", "Postpartum tablet total overflows")
    })?;

    patient.edc = derived::estimated_due_date(patient.lmp);

    let latest = latest_prenatal_visit(&patient.prenatal_visits).cloned();
    patient.height = latest.as_ref().and_then(|v| v.height);
    patient.weight = latest.as_ref().and_then(|v| v.weight);
    patient.bmi = latest.as_ref().and_then(|v| v.bmi);
    patient.bmi_category = latest.as_ref().and_then(|v| v.bmi_category);
    patient.aog = latest.as_ref().and_then(|v| v.aog.clone());
    patient.trimester = latest.as_ref().and_then(|v| v.trimester);

    patient.postpartum_ifa_count = Some(total);
    patient.postpartum_ifa_completed_date =
        derived::threshold_completion_date(&patient.postpartum_logs, POSTPARTUM_IFA_GOAL);
    patient.is_postpartum_ifa_completed = CompletionFlag::yes_no(total >= POSTPARTUM_IFA_GOAL);
    patient.is_4pnc_completed = CompletionFlag::yes_no(patient.pnc_contacts.count() == 4);
    patient.is_vit_a_completed = CompletionFlag::yes_no(patient.vit_a_completed_date.is_some());

    if patient.delivery_facility_type != Some(FacilityType::NonHealthFacility) {
        patient.delivery_non_health_place = None;
    }

    if patient.is_live_birth() {
        let expected = expected_baby_count(patient.pregnancy_type, patient.pregnancy_multiple_count);
        patient.baby_details.truncate(expected);
        if let Some(first) = patient.baby_details.first() {
            patient.birth_weight = first.weight;
            patient.birth_weight_category = first.category;
            patient.birth_sex = first.sex;
        }
    }

    log::debug!("Finalized record {}", patient.label());
    Ok(())
}
