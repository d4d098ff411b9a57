//! Validated edits on a draft record

use chrono::NaiveDate;

use super::sequence::{Collection, check_chronological, check_positional};
use super::ValidationError;
use crate::algorithm::derived::{
    self, MAX_AOG_WEEKS, MAX_BABIES, POSTPARTUM_IFA_GOAL, birth_weight_category,
    expected_baby_count, gestational_age,
};
use crate::models::{
    BabyDetail, CompletionFlag, DeliveryOutcome, LabLog, Patient, PostpartumLog, PregnancyType,
    PrenatalVisit, Sex, SupplementKind, SupplementLog,
};

/// Gatekeeper for every change to a draft record
///
/// Each operation either applies the change together with the derived fields
/// that depend on it, or returns the reason for rejection and leaves the
/// record exactly as it was.
pub struct RecordValidator<'a> {
    patient: &'a mut Patient,
}

impl<'a> RecordValidator<'a> {
    /// Wrap a draft record
    pub fn new(patient: &'a mut Patient) -> Self {
        Self { patient }
    }

    /// Current state of the draft
    #[must_use]
    pub fn patient(&self) -> &Patient {
        self.patient
    }

    // Prenatal visits

    /// Append a prenatal visit; its date must follow every recorded visit
    pub fn add_prenatal_visit(&mut self, visit: PrenatalVisit) -> Result<(), ValidationError> {
        let visit = self.prepare_visit(visit, None)?;
        log::debug!(
            "Accepted prenatal visit {:?} for {}",
            visit.date,
            self.patient.label()
        );
        self.patient.prenatal_visits.push(visit);
        Ok(())
    }

    /// Replace the visit at `index`; its date must fall between its neighbours
    pub fn edit_prenatal_visit(
        &mut self,
        index: usize,
        visit: PrenatalVisit,
    ) -> Result<(), ValidationError> {
        check_index(Collection::PrenatalVisits, index, self.patient.prenatal_visits.len())?;
        let visit = self.prepare_visit(visit, Some(index))?;
        log::debug!("Accepted edit of prenatal visit {index} for {}", self.patient.label());
        self.patient.prenatal_visits[index] = visit;
        Ok(())
    }

    /// Remove the visit at `index`
    pub fn remove_prenatal_visit(&mut self, index: usize) -> Result<PrenatalVisit, ValidationError> {
        check_index(Collection::PrenatalVisits, index, self.patient.prenatal_visits.len())?;
        Ok(self.patient.prenatal_visits.remove(index))
    }

    fn prepare_visit(
        &self,
        mut visit: PrenatalVisit,
        replacing: Option<usize>,
    ) -> Result<PrenatalVisit, ValidationError> {
        let field = Collection::PrenatalVisits.field_name();
        let date = visit
            .date
            .ok_or_else(|| ValidationError::missing(field, "Visit date is required"))?;
        check_measure("weight", visit.weight)?;
        check_measure("height", visit.height)?;

        let aog = gestational_age(self.patient.lmp, Some(date));
        if let Some(aog) = aog.filter(derived::GestationalAge::is_capped) {
            log::debug!(
                "Visit on {date} is {} weeks after LMP, reported as {MAX_AOG_WEEKS}",
                aog.raw_weeks().unwrap_or_default()
            );
        }
        visit.aog = aog.map(|a| a.to_string());
        visit.trimester = aog.and_then(|a| a.trimester());
        if visit.is_first_trimester() && visit.weight.is_none() {
            return Err(ValidationError::missing(
                "weight",
                "Weight is required for a 1st trimester visit",
            ));
        }

        match derived::bmi(visit.weight, visit.height) {
            Some(bmi) => {
                visit.bmi = Some(bmi.value);
                visit.bmi_category = Some(bmi.category);
            }
            None => {
                visit.bmi = None;
                visit.bmi_category = None;
            }
        }

        let dates: Vec<_> = self.patient.prenatal_visits.iter().map(|v| v.date).collect();
        check_chronological(&dates, replacing, date, Collection::PrenatalVisits)?;
        Ok(visit)
    }

    /// Set or clear the LMP; recomputes the due date and every visit's AOG and trimester
    pub fn set_lmp(&mut self, lmp: Option<NaiveDate>) -> Result<(), ValidationError> {
        self.patient.lmp = lmp;
        self.patient.edc = derived::estimated_due_date(lmp);
        for visit in &mut self.patient.prenatal_visits {
            let aog = gestational_age(lmp, visit.date);
            visit.aog = aog.map(|a| a.to_string());
            visit.trimester = aog.and_then(|a| a.trimester());
        }
        log::debug!("LMP set to {lmp:?} for {}", self.patient.label());
        Ok(())
    }

    // Positional sequences

    /// Set or clear TD dose `slot` (1..=5)
    pub fn set_td_dose(&mut self, slot: usize, date: Option<NaiveDate>) -> Result<(), ValidationError> {
        if let Some(date) = date {
            check_positional(self.patient.td_doses.as_array(), slot, date, Collection::TdDoses)?;
        }
        if !self.patient.td_doses.set(slot, date) {
            return Err(slot_range_error(Collection::TdDoses, slot, 5));
        }
        log::debug!("Accepted td{slot} = {date:?} for {}", self.patient.label());
        Ok(())
    }

    /// Set or clear postnatal contact `slot` (1..=4)
    pub fn set_pnc_contact(
        &mut self,
        slot: usize,
        date: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        if let Some(date) = date {
            check_positional(
                self.patient.pnc_contacts.as_array(),
                slot,
                date,
                Collection::PncContacts,
            )?;
        }
        if !self.patient.pnc_contacts.set(slot, date) {
            return Err(slot_range_error(Collection::PncContacts, slot, 4));
        }
        log::debug!("Accepted pnc_date_{slot} = {date:?} for {}", self.patient.label());
        Ok(())
    }

    // Supplements

    /// Append a supplement log; its date must follow every log of the same kind
    pub fn add_supplement(
        &mut self,
        kind: SupplementKind,
        log: SupplementLog,
    ) -> Result<(), ValidationError> {
        let collection = Collection::Supplements(kind);
        let date = check_counted_entry(collection, log.date, log.count)?;
        let dates: Vec<_> = self.patient.supplement_log(kind).iter().map(|l| l.date).collect();
        check_chronological(&dates, None, date, collection)?;
        log::debug!("Accepted {} entry on {date} for {}", kind.field_name(), self.patient.label());
        self.patient.supplement_log_mut(kind).push(log);
        Ok(())
    }

    /// Replace the supplement log at `index`
    pub fn edit_supplement(
        &mut self,
        kind: SupplementKind,
        index: usize,
        log: SupplementLog,
    ) -> Result<(), ValidationError> {
        let collection = Collection::Supplements(kind);
        check_index(collection, index, self.patient.supplement_log(kind).len())?;
        let date = check_counted_entry(collection, log.date, log.count)?;
        let dates: Vec<_> = self.patient.supplement_log(kind).iter().map(|l| l.date).collect();
        check_chronological(&dates, Some(index), date, collection)?;
        self.patient.supplement_log_mut(kind)[index] = log;
        Ok(())
    }

    /// Remove the supplement log at `index`
    pub fn remove_supplement(
        &mut self,
        kind: SupplementKind,
        index: usize,
    ) -> Result<SupplementLog, ValidationError> {
        check_index(Collection::Supplements(kind), index, self.patient.supplement_log(kind).len())?;
        Ok(self.patient.supplement_log_mut(kind).remove(index))
    }

    // Laboratory screenings

    /// Append a lab log; labs carry no ordering requirement
    pub fn add_lab_log(&mut self, log: LabLog) -> Result<(), ValidationError> {
        check_lab_entry(&log)?;
        self.patient.lab_logs.push(log);
        Ok(())
    }

    /// Replace the lab log at `index`
    pub fn edit_lab_log(&mut self, index: usize, log: LabLog) -> Result<(), ValidationError> {
        check_index(Collection::LabLogs, index, self.patient.lab_logs.len())?;
        check_lab_entry(&log)?;
        self.patient.lab_logs[index] = log;
        Ok(())
    }

    /// Remove the lab log at `index`
    pub fn remove_lab_log(&mut self, index: usize) -> Result<LabLog, ValidationError> {
        check_index(Collection::LabLogs, index, self.patient.lab_logs.len())?;
        Ok(self.patient.lab_logs.remove(index))
    }

    // Postpartum supplementation

    /// Append a postpartum log and recompute the completion date and total
    pub fn add_postpartum_log(&mut self, log: PostpartumLog) -> Result<(), ValidationError> {
        let date = check_counted_entry(Collection::PostpartumLogs, log.date, log.count)?;
        let dates: Vec<_> = self.patient.postpartum_logs.iter().map(|l| l.date).collect();
        check_chronological(&dates, None, date, Collection::PostpartumLogs)?;
        let mut logs = self.patient.postpartum_logs.clone();
        logs.push(log);
        self.commit_postpartum(logs)
    }

    /// Replace the postpartum log at `index` and recompute the completion date and total
    pub fn edit_postpartum_log(
        &mut self,
        index: usize,
        log: PostpartumLog,
    ) -> Result<(), ValidationError> {
        check_index(Collection::PostpartumLogs, index, self.patient.postpartum_logs.len())?;
        let date = check_counted_entry(Collection::PostpartumLogs, log.date, log.count)?;
        let dates: Vec<_> = self.patient.postpartum_logs.iter().map(|l| l.date).collect();
        check_chronological(&dates, Some(index), date, Collection::PostpartumLogs)?;
        let mut logs = self.patient.postpartum_logs.clone();
        logs[index] = log;
        self.commit_postpartum(logs)
    }

    /// Remove the postpartum log at `index` and recompute the completion date and total
    pub fn remove_postpartum_log(&mut self, index: usize) -> Result<PostpartumLog, ValidationError> {
        check_index(Collection::PostpartumLogs, index, self.patient.postpartum_logs.len())?;
        let mut logs = self.patient.postpartum_logs.clone();
        let removed = logs.remove(index);
        self.commit_postpartum(logs)?;
        Ok(removed)
    }

    fn commit_postpartum(&mut self, logs: Vec<PostpartumLog>) -> Result<(), ValidationError> {
        let total = derived::running_total(&logs).ok_or_else(|| {
            ValidationError::invalid_range(
                Collection::PostpartumLogs.field_name(),
                "Postpartum tablet total exceeds the countable range",
            )
        })?;
        let completed_on = derived::threshold_completion_date(&logs, POSTPARTUM_IFA_GOAL);
        self.patient.postpartum_logs = logs;
        self.patient.postpartum_ifa_count = Some(total);
        self.patient.postpartum_ifa_completed_date = completed_on;
        self.patient.is_postpartum_ifa_completed = CompletionFlag::yes_no(total >= POSTPARTUM_IFA_GOAL);
        log::debug!(
            "Postpartum IFA total {total} (completed on {completed_on:?}) for {}",
            self.patient.label()
        );
        Ok(())
    }

    // Delivery

    /// Record the pregnancy outcome
    ///
    /// Fetal death and abortion clear every live-birth delivery field; a live
    /// birth makes sure one baby entry exists per expected infant.
    pub fn set_delivery_outcome(
        &mut self,
        outcome: Option<DeliveryOutcome>,
    ) -> Result<(), ValidationError> {
        let p = &mut *self.patient;
        p.delivery_outcome = outcome;
        match outcome {
            Some(o) if !o.is_live_birth() => {
                p.birth_weight = None;
                p.birth_weight_category = None;
                p.birth_sex = None;
                p.baby_details.clear();
                p.delivery_time = None;
                p.delivery_mode = None;
                p.delivery_attendant = None;
                p.delivery_place = None;
                p.delivery_facility_type = None;
                p.delivery_non_health_place = None;
                p.delivery_place_capable = None;
                p.pregnancy_type = None;
                p.pregnancy_multiple_count = None;
            }
            Some(_) => resize_babies(p),
            None => {}
        }
        log::debug!("Outcome set to {outcome:?} for {}", self.patient.label());
        Ok(())
    }

    /// Record singleton, twins or multiple pregnancy and resize the baby entries
    ///
    /// A multiple count of 0 is stored as 1.
    pub fn set_pregnancy_type(
        &mut self,
        pregnancy_type: Option<PregnancyType>,
        multiple_count: Option<u32>,
    ) -> Result<(), ValidationError> {
        let multiple_count = match pregnancy_type {
            Some(PregnancyType::Multiple) => match multiple_count {
                Some(0) => Some(1),
                Some(n) if (1..=MAX_BABIES as u32).contains(&n) => Some(n),
                Some(n) => {
                    return Err(ValidationError::invalid_range(
                        "pregnancy_multiple_count",
                        format!("{n} infants is outside 1..={MAX_BABIES}"),
                    ));
                }
                None => None,
            },
            _ => None,
        };
        self.patient.pregnancy_type = pregnancy_type;
        self.patient.pregnancy_multiple_count = multiple_count;
        if self.patient.delivery_outcome.is_none_or(|o| o.is_live_birth()) {
            resize_babies(self.patient);
        }
        Ok(())
    }

    /// Record the birth weight of baby `index` (0-based) in grams
    pub fn set_baby_weight(&mut self, index: usize, grams: Option<f64>) -> Result<(), ValidationError> {
        check_measure("birth_weight", grams)?;
        let category = birth_weight_category(grams);
        let baby = self.baby_mut(index)?;
        baby.weight = grams;
        baby.category = category;
        if index == 0 {
            self.patient.birth_weight = grams;
            self.patient.birth_weight_category = category;
        }
        Ok(())
    }

    /// Record the sex of baby `index` (0-based)
    pub fn set_baby_sex(&mut self, index: usize, sex: Option<Sex>) -> Result<(), ValidationError> {
        self.baby_mut(index)?.sex = sex;
        if index == 0 {
            self.patient.birth_sex = sex;
        }
        Ok(())
    }

    fn baby_mut(&mut self, index: usize) -> Result<&mut BabyDetail, ValidationError> {
        if self.patient.delivery_outcome.is_some_and(|o| !o.is_live_birth()) {
            return Err(ValidationError::invalid_range(
                "baby_details",
                "No infants are recorded for a fetal death or abortion",
            ));
        }
        let expected = expected_baby_count(
            self.patient.pregnancy_type,
            self.patient.pregnancy_multiple_count,
        );
        if index >= expected {
            return Err(ValidationError::invalid_range(
                "baby_details",
                format!("Baby {} is outside the {expected} expected", index + 1),
            ));
        }
        resize_babies(self.patient);
        Ok(&mut self.patient.baby_details[index])
    }
}

/// Grow or shrink `baby_details` to the expected infant count, seeding baby 1
/// from the legacy single-baby fields
fn resize_babies(patient: &mut Patient) {
    let expected = expected_baby_count(patient.pregnancy_type, patient.pregnancy_multiple_count);
    if patient.baby_details.is_empty() {
        patient.baby_details.push(BabyDetail {
            weight: patient.birth_weight,
            category: patient.birth_weight_category,
            sex: patient.birth_sex,
        });
    }
    patient.baby_details.resize_with(expected, BabyDetail::default);
}

fn check_index(collection: Collection, index: usize, len: usize) -> Result<(), ValidationError> {
    if index < len {
        Ok(())
    } else {
        Err(ValidationError::invalid_range(
            collection.field_name(),
            format!("index {index} is outside a list of {len}"),
        ))
    }
}

fn slot_range_error(collection: Collection, slot: usize, len: usize) -> ValidationError {
    ValidationError::invalid_range(
        collection.field_name(),
        format!("slot {slot} is outside 1..={len}"),
    )
}

fn check_measure(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(ValidationError::invalid_range(
            field,
            format!("{field} must be a positive number, got {v}"),
        )),
        _ => Ok(()),
    }
}

fn check_counted_entry(
    collection: Collection,
    date: Option<NaiveDate>,
    count: Option<u32>,
) -> Result<NaiveDate, ValidationError> {
    let date = date.ok_or_else(|| ValidationError::missing(collection.field_name(), "Date is required"))?;
    match count {
        Some(n) if n > 0 => Ok(date),
        _ => Err(ValidationError::missing(
            collection.field_name(),
            "A positive count is required",
        )),
    }
}

fn check_lab_entry(log: &LabLog) -> Result<(), ValidationError> {
    let field = Collection::LabLogs.field_name();
    if log.test_type.is_none() {
        return Err(ValidationError::missing(field, "Test type is required"));
    }
    if log.date.is_none() {
        return Err(ValidationError::missing(field, "Date is required"));
    }
    if log.result.is_none() {
        return Err(ValidationError::missing(field, "Result is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::validation::ErrorKind;
    use crate::models::{BirthWeightCategory, LabResult, LabTestType, Trimester};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn draft() -> Patient {
        let mut p = Patient::new("Ana", "Reyes");
        p.lmp = Some(d(1, 1));
        p
    }

    #[test]
    fn test_visit_after_latest_is_accepted_and_derived() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.add_prenatal_visit(PrenatalVisit::new(d(1, 10), Some(70.0), Some(175.0)))
            .unwrap();
        v.add_prenatal_visit(PrenatalVisit::new(d(1, 15), Some(70.5), Some(175.0)))
            .unwrap();

        let visit = &p.prenatal_visits[1];
        assert_eq!(visit.trimester, Some(Trimester::First));
        assert_eq!(visit.aog.as_deref(), Some("2 weeks 0 days"));
        assert_eq!(visit.bmi, Some(23.0));
    }

    #[test]
    fn test_visit_before_latest_is_rejected_untouched() {
        let mut p = draft();
        RecordValidator::new(&mut p)
            .add_prenatal_visit(PrenatalVisit::new(d(1, 10), Some(60.0), None))
            .unwrap();
        let before = p.clone();

        let err = RecordValidator::new(&mut p)
            .add_prenatal_visit(PrenatalVisit::new(d(1, 5), Some(60.0), None))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfOrderDate);
        assert_eq!(err.conflicting_date, Some(d(1, 10)));
        assert_eq!(p, before);
    }

    #[test]
    fn test_first_trimester_visit_requires_weight() {
        let mut p = draft();
        let err = RecordValidator::new(&mut p)
            .add_prenatal_visit(PrenatalVisit::new(d(1, 20), None, Some(160.0)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
        assert_eq!(err.field, "weight");

        // Second trimester visits may omit weight
        RecordValidator::new(&mut p)
            .add_prenatal_visit(PrenatalVisit::new(d(5, 1), None, None))
            .unwrap();
        assert_eq!(p.prenatal_visits[0].bmi_category, None);
    }

    #[test]
    fn test_visit_past_ceiling_is_capped() {
        let mut p = draft();
        RecordValidator::new(&mut p)
            .add_prenatal_visit(PrenatalVisit::new(d(12, 1), Some(70.0), None))
            .unwrap();
        assert!(p.prenatal_visits[0].aog.as_deref().unwrap().starts_with("43 weeks"));
    }

    #[test]
    fn test_set_lmp_recomputes_visits() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.add_prenatal_visit(PrenatalVisit::new(d(3, 1), Some(60.0), None)).unwrap();
        v.set_lmp(Some(d(2, 1))).unwrap();
        assert_eq!(p.edc, NaiveDate::from_ymd_opt(2024, 11, 7));
        assert_eq!(p.prenatal_visits[0].aog.as_deref(), Some("4 weeks 1 days"));
    }

    #[test]
    fn test_td_dose_positional() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.set_td_dose(3, Some(d(3, 1))).unwrap();
        v.set_td_dose(1, Some(d(1, 1))).unwrap();
        let err = v.set_td_dose(2, Some(d(3, 1))).unwrap_err();
        assert_eq!(err.field, "td2");
        v.set_td_dose(2, Some(d(2, 1))).unwrap();
        assert_eq!(v.set_td_dose(6, None).unwrap_err().kind, ErrorKind::InvalidRange);
        v.set_td_dose(3, None).unwrap();
        assert_eq!(p.td_doses.count(), 2);
    }

    #[test]
    fn test_supplement_kinds_are_independent() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.add_supplement(SupplementKind::Ifa, SupplementLog::new(d(2, 1), 30)).unwrap();
        v.add_supplement(SupplementKind::Mms, SupplementLog::new(d(1, 15), 30)).unwrap();
        assert!(v.add_supplement(SupplementKind::Ifa, SupplementLog::new(d(1, 20), 30)).is_err());
        let err = v
            .add_supplement(SupplementKind::Calcium, SupplementLog::new(d(1, 20), 0))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
    }

    #[test]
    fn test_postpartum_completion_tracks_threshold() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.add_postpartum_log(PostpartumLog::new(d(1, 1), 30)).unwrap();
        v.add_postpartum_log(PostpartumLog::new(d(1, 20), 30)).unwrap();
        v.add_postpartum_log(PostpartumLog::new(d(2, 10), 30)).unwrap();
        assert_eq!(p.postpartum_ifa_completed_date, Some(d(2, 10)));
        assert_eq!(p.postpartum_ifa_count, Some(90));
        assert!(p.is_postpartum_ifa_completed.is_set());

        RecordValidator::new(&mut p).remove_postpartum_log(2).unwrap();
        assert_eq!(p.postpartum_ifa_completed_date, None);
        assert_eq!(p.postpartum_ifa_count, Some(60));
        assert!(!p.is_postpartum_ifa_completed.is_set());
    }

    #[test]
    fn test_lab_log_requires_result() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        let mut log = LabLog::new(LabTestType::Syphilis, d(2, 1), LabResult::Negative);
        log.result = None;
        assert_eq!(v.add_lab_log(log).unwrap_err().kind, ErrorKind::MissingRequiredField);
        v.add_lab_log(LabLog::new(LabTestType::Hiv, d(1, 1), LabResult::Negative)).unwrap();
        // Lab logs are not ordered
        v.add_lab_log(LabLog::new(LabTestType::Cbc, d(1, 1), LabResult::WithAnemia)).unwrap();
        assert_eq!(p.lab_logs.len(), 2);
    }

    #[test]
    fn test_fetal_death_clears_birth_fields() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.set_delivery_outcome(Some(DeliveryOutcome::FullTerm)).unwrap();
        v.set_pregnancy_type(Some(PregnancyType::Twins), None).unwrap();
        v.set_baby_weight(0, Some(2400.0)).unwrap();
        v.set_baby_sex(1, Some(Sex::Female)).unwrap();
        assert_eq!(p.baby_details.len(), 2);
        assert_eq!(p.birth_weight_category, Some(BirthWeightCategory::Low));

        let mut v = RecordValidator::new(&mut p);
        v.set_delivery_outcome(Some(DeliveryOutcome::FetalDeath)).unwrap();
        assert!(v.set_baby_weight(0, Some(3000.0)).is_err());
        assert!(p.baby_details.is_empty());
        assert_eq!(p.birth_weight, None);
        assert_eq!(p.pregnancy_type, None);
    }

    #[test]
    fn test_baby_index_bounded_by_pregnancy_type() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.set_pregnancy_type(Some(PregnancyType::Multiple), Some(3)).unwrap();
        v.set_baby_sex(2, Some(Sex::Male)).unwrap();
        assert_eq!(v.set_baby_sex(3, Some(Sex::Male)).unwrap_err().kind, ErrorKind::InvalidRange);
        assert!(v.set_pregnancy_type(Some(PregnancyType::Multiple), Some(13)).is_err());
        v.set_pregnancy_type(Some(PregnancyType::Singleton), None).unwrap();
        assert_eq!(p.baby_details.len(), 1);
    }

    #[test]
    fn test_zero_multiple_count_means_one_infant() {
        let mut p = draft();
        let mut v = RecordValidator::new(&mut p);
        v.set_pregnancy_type(Some(PregnancyType::Multiple), Some(0)).unwrap();
        assert_eq!(v.patient().pregnancy_multiple_count, Some(1));
        assert_eq!(v.patient().baby_details.len(), 1);
        assert!(v.set_baby_sex(1, Some(Sex::Female)).is_err());
    }
}
