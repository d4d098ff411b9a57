//! Per-patient indicator rules

use smallvec::SmallVec;

use super::indicator::Indicator;
use crate::algorithm::derived::{
    self, ANC_COMPLETE_VISITS, AgeBand, GRAND_MULTIGRAVIDA, MAX_BABIES, POSTPARTUM_IFA_GOAL,
    PRENATAL_SUPPLEMENT_GOAL,
};
use crate::error::{RegistryError, Result};
use crate::models::{
    Attendant, BabyDetail, BirthWeightCategory, BmiCategory, DeliveryMode, DeliveryOutcome,
    FacilityType, LabLog, LabTestType, Patient, Sex,
};

/// Indicators one patient adds to, and the band they are counted in
///
/// An indicator may appear more than once, e.g. `live_births` for twins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientContribution {
    pub band: AgeBand,
    pub indicators: SmallVec<[Indicator; 32]>,
}

impl PatientContribution {
    /// How many times an indicator is counted for this patient
    #[must_use]
    pub fn count_of(&self, indicator: Indicator) -> usize {
        self.indicators.iter().filter(|i| **i == indicator).count()
    }
}

/// Evaluate every indicator rule for one patient
///
/// # Returns
/// `Ok(None)` when the age falls outside every reporting band
///
/// # Errors
/// `MalformedRecord` when a tablet total overflows or a delivery lists more
/// infants than can be recorded
pub fn evaluate_patient(patient: &Patient) -> Result<Option<PatientContribution>> {
    let Some(band) = patient.age.and_then(AgeBand::from_age) else {
        return Ok(None);
    };

    let mut hits = SmallVec::new();
    prenatal(patient, &mut hits)?;
    labs(patient, &mut hits);
    if patient.delivery_date.is_some() {
        delivery(patient, &mut hits)?;
    }
    postpartum(patient, &mut hits)?;

    Ok(Some(PatientContribution {
        band,
        indicators: hits,
    }))
}

type Hits = SmallVec<[Indicator; 32]>;

fn total_or_malformed<T: crate::models::DatedCount>(patient: &Patient, logs: &[T], what: &str) -> Result<u32> {
    derived::running_total(logs)
        .ok_or_else(|| RegistryError::malformed(patient.label(), format!("{what} tablet total overflows")))
}

fn prenatal(patient: &Patient, hits: &mut Hits) -> Result<()> {
    let visits = &patient.prenatal_visits;
    if visits.len() >= ANC_COMPLETE_VISITS {
        hits.push(Indicator::Visits4);
    }

    let first_trimester = visits.iter().rev().find(|v| v.is_first_trimester());
    let category = first_trimester
        .and_then(|v| v.bmi_category.or_else(|| v.bmi.map(BmiCategory::from_value)));
    match category {
        Some(BmiCategory::Normal) => hits.push(Indicator::BmiNormal),
        Some(BmiCategory::Low) => hits.push(Indicator::BmiLow),
        Some(BmiCategory::High) => hits.push(Indicator::BmiHigh),
        None => {}
    }

    match patient.gravida {
        Some(1) if patient.td_doses.get(2).is_some() => hits.push(Indicator::Td2PlusFirst),
        Some(g) if g >= 2 && (3..=5).any(|slot| patient.td_doses.get(slot).is_some()) => {
            hits.push(Indicator::Td2PlusRepeat);
        }
        _ => {}
    }

    if total_or_malformed(patient, &patient.supplements_ifa, "IFA")? >= PRENATAL_SUPPLEMENT_GOAL {
        hits.push(Indicator::Iron);
    }
    if patient.is_high_risk && patient.calcium_carbonate_completed.is_set() {
        hits.push(Indicator::Calcium);
    }
    if patient.is_deworming_given {
        hits.push(Indicator::Deworming);
    }
    Ok(())
}

fn labs(patient: &Patient, hits: &mut Hits) {
    for test in LabTestType::ALL {
        // The first log of a type decides its result
        let first = patient.lab_logs.iter().find(|l| l.test_type == Some(test));
        let legacy = patient.legacy_lab_result(test);

        let screened = first.is_some() || legacy.is_some();
        let positive = first.is_some_and(LabLog::is_positive) || legacy.is_some_and(|r| test.is_positive_legacy(r));

        let (screen, found) = Indicator::for_lab(test);
        if screened {
            hits.push(screen);
        }
        if positive {
            hits.push(found);
        }
    }
}

fn delivery(patient: &Patient, hits: &mut Hits) -> Result<()> {
    hits.push(Indicator::Deliveries);

    if patient.is_live_birth() {
        let legacy;
        let babies: &[BabyDetail] = if patient.baby_details.is_empty() {
            legacy = [BabyDetail {
                weight: patient.birth_weight,
                category: patient.birth_weight_category,
                sex: patient.birth_sex,
            }];
            &legacy
        } else {
            &patient.baby_details
        };
        if babies.len() > MAX_BABIES {
            return Err(RegistryError::malformed(
                patient.label(),
                format!("{} babies recorded, at most {MAX_BABIES} allowed", babies.len()),
            ));
        }

        for baby in babies {
            hits.push(Indicator::LiveBirths);
            let category = baby
                .category
                .or_else(|| derived::birth_weight_category(baby.weight))
                .unwrap_or(BirthWeightCategory::Unknown);
            let by_sex = match (category, baby.sex) {
                (BirthWeightCategory::Normal, _) => Some(Indicator::LbNormal),
                (BirthWeightCategory::Low, Some(Sex::Male)) => Some(Indicator::LbLowMale),
                (BirthWeightCategory::Low, Some(Sex::Female)) => Some(Indicator::LbLowFemale),
                (BirthWeightCategory::Unknown, Some(Sex::Male)) => Some(Indicator::LbUnknownMale),
                (BirthWeightCategory::Unknown, Some(Sex::Female)) => Some(Indicator::LbUnknownFemale),
                _ => None,
            };
            hits.extend(by_sex);
        }
    }

    match patient.delivery_attendant {
        Some(Attendant::Doctor) => hits.push(Indicator::AttendantMd),
        Some(Attendant::Nurse) => hits.push(Indicator::AttendantRn),
        Some(Attendant::Midwife) => hits.push(Indicator::AttendantMw),
        Some(Attendant::Other(_)) | None => {}
    }
    match patient.delivery_facility_type {
        Some(FacilityType::Public) => hits.push(Indicator::FacilityPublic),
        Some(FacilityType::Private) => hits.push(Indicator::FacilityPrivate),
        Some(FacilityType::NonHealthFacility) => hits.push(Indicator::NonFacility),
        None => {}
    }
    match patient.delivery_mode {
        Some(DeliveryMode::Vaginal) => hits.push(Indicator::DelVaginal),
        Some(DeliveryMode::Cesarean) => hits.push(Indicator::DelCs),
        Some(DeliveryMode::CombinedVaginalCesarean) | None => {}
    }
    match patient.delivery_outcome {
        Some(DeliveryOutcome::FullTerm) => hits.push(Indicator::OutcomeFt),
        Some(DeliveryOutcome::PreTerm) => hits.push(Indicator::OutcomePt),
        Some(DeliveryOutcome::FetalDeath) => hits.push(Indicator::OutcomeFd),
        Some(DeliveryOutcome::Abortion) => hits.push(Indicator::OutcomeAb),
        None => {}
    }

    if patient.prenatal_visits.len() >= ANC_COMPLETE_VISITS {
        hits.push(Indicator::Anc4Delivery);
    }
    if patient.prenatal_visits.iter().any(|v| v.is_first_trimester()) {
        hits.push(Indicator::Anc1stTri);
    }
    match patient.gravida {
        Some(1) => hits.push(Indicator::FirstBirth),
        Some(g) if g >= GRAND_MULTIGRAVIDA => hits.push(Indicator::GrandMultigravida),
        _ => {}
    }
    Ok(())
}

fn postpartum(patient: &Patient, hits: &mut Hits) -> Result<()> {
    let contacts = patient.pnc_contacts.count();
    if contacts >= 2 {
        hits.push(Indicator::Pnc2);
    }
    if contacts == 4 || patient.is_4pnc_completed.is_set() {
        hits.push(Indicator::Pnc4);
    }

    let total = total_or_malformed(patient, &patient.postpartum_logs, "Postpartum IFA")?;
    if total >= POSTPARTUM_IFA_GOAL
        || patient.postpartum_ifa_count.is_some_and(|c| c >= POSTPARTUM_IFA_GOAL)
        || patient.is_postpartum_ifa_completed.is_set()
    {
        hits.push(Indicator::PostpartumIfa);
    }
    if patient.vit_a_completed_date.is_some() || patient.is_vit_a_completed.is_set() {
        hits.push(Indicator::VitA);
    }
    if patient.has_hypertension {
        hits.push(Indicator::Hypertension);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::{CompletionFlag, LabLog, LabResult, PrenatalVisit, SupplementLog, Trimester};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn aged(age: u32) -> Patient {
        let mut p = Patient::new("Ana", "Reyes");
        p.age = Some(age);
        p
    }

    #[test]
    fn test_out_of_band_patient_is_excluded() {
        assert_eq!(evaluate_patient(&aged(9)).unwrap(), None);
        assert_eq!(evaluate_patient(&aged(50)).unwrap(), None);
        assert_eq!(evaluate_patient(&Patient::new("Ana", "Reyes")).unwrap(), None);
        assert_eq!(evaluate_patient(&aged(30)).unwrap().unwrap().band, AgeBand::Band20To49);
    }

    #[test]
    fn test_first_trimester_bmi_uses_latest_flagged_visit() {
        let mut p = aged(22);
        let mut early = PrenatalVisit::new(d(1, 10), Some(40.0), Some(160.0));
        early.trimester = Some(Trimester::First);
        early.bmi_category = Some(BmiCategory::Low);
        let mut later = PrenatalVisit::new(d(2, 10), Some(60.0), Some(160.0));
        later.trimester = Some(Trimester::First);
        later.bmi_category = Some(BmiCategory::Normal);
        let mut second = PrenatalVisit::new(d(5, 10), Some(80.0), Some(160.0));
        second.trimester = Some(Trimester::Second);
        second.bmi_category = Some(BmiCategory::High);
        p.prenatal_visits = vec![early, later, second];

        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::BmiNormal), 1);
        assert_eq!(c.count_of(Indicator::BmiLow), 0);
        assert_eq!(c.count_of(Indicator::BmiHigh), 0);
    }

    #[test]
    fn test_lab_screening_from_logs_and_legacy_fields() {
        let mut p = aged(18);
        p.lab_logs = vec![
            LabLog::new(LabTestType::Cbc, d(2, 1), LabResult::WithoutAnemia),
            LabLog::new(LabTestType::Cbc, d(3, 1), LabResult::WithAnemia),
            LabLog::new(LabTestType::Hiv, d(2, 1), LabResult::Negative),
        ];
        p.lab_syphilis_result = Some("Reactive".to_string());
        p.lab_diabetes_result = Some("Negative".to_string());

        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::AnemiaScreen), 1);
        assert_eq!(c.count_of(Indicator::AnemiaPositive), 0);
        assert_eq!(c.count_of(Indicator::HivScreen), 1);
        assert_eq!(c.count_of(Indicator::HivPositive), 0);
        assert_eq!(c.count_of(Indicator::SyphilisScreen), 1);
        assert_eq!(c.count_of(Indicator::SyphilisPositive), 1);
        assert_eq!(c.count_of(Indicator::GdScreen), 1);
        assert_eq!(c.count_of(Indicator::GdPositive), 0);
        assert_eq!(c.count_of(Indicator::HepBScreen), 0);
    }

    #[test]
    fn test_first_lab_log_of_a_type_decides() {
        let mut p = aged(25);
        p.lab_logs = vec![
            LabLog::new(LabTestType::Cbc, d(2, 1), LabResult::WithAnemia),
            LabLog::new(LabTestType::Syphilis, d(2, 1), LabResult::NonReactive),
            LabLog::new(LabTestType::Cbc, d(3, 1), LabResult::WithoutAnemia),
            LabLog::new(LabTestType::Syphilis, d(3, 1), LabResult::Positive),
        ];
        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::AnemiaScreen), 1);
        assert_eq!(c.count_of(Indicator::AnemiaPositive), 1);
        assert_eq!(c.count_of(Indicator::SyphilisScreen), 1);
        assert_eq!(c.count_of(Indicator::SyphilisPositive), 0);

        p.lab_syphilis_result = Some("Reactive".to_string());
        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::SyphilisPositive), 1);
    }

    #[test]
    fn test_delivery_counts_each_baby() {
        let mut p = aged(25);
        p.gravida = Some(6);
        p.delivery_date = Some(d(9, 1));
        p.delivery_outcome = Some(DeliveryOutcome::FullTerm);
        p.delivery_attendant = Some(Attendant::Midwife);
        p.delivery_facility_type = Some(FacilityType::Public);
        p.delivery_mode = Some(DeliveryMode::Vaginal);
        p.baby_details = vec![
            BabyDetail { weight: Some(3000.0), category: None, sex: Some(Sex::Male) },
            BabyDetail { weight: Some(2100.0), category: None, sex: Some(Sex::Female) },
            BabyDetail { weight: None, category: None, sex: Some(Sex::Male) },
        ];

        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::Deliveries), 1);
        assert_eq!(c.count_of(Indicator::LiveBirths), 3);
        assert_eq!(c.count_of(Indicator::LbNormal), 1);
        assert_eq!(c.count_of(Indicator::LbLowFemale), 1);
        assert_eq!(c.count_of(Indicator::LbUnknownMale), 1);
        assert_eq!(c.count_of(Indicator::AttendantMw), 1);
        assert_eq!(c.count_of(Indicator::FacilityPublic), 1);
        assert_eq!(c.count_of(Indicator::DelVaginal), 1);
        assert_eq!(c.count_of(Indicator::OutcomeFt), 1);
        assert_eq!(c.count_of(Indicator::GrandMultigravida), 1);
        assert_eq!(c.count_of(Indicator::FirstBirth), 0);
    }

    #[test]
    fn test_live_birth_falls_back_to_legacy_baby() {
        let mut p = aged(25);
        p.delivery_date = Some(d(9, 1));
        p.delivery_outcome = Some(DeliveryOutcome::PreTerm);
        p.birth_weight_category = Some(BirthWeightCategory::Low);
        p.birth_sex = Some(Sex::Male);

        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::LiveBirths), 1);
        assert_eq!(c.count_of(Indicator::LbLowMale), 1);
    }

    #[test]
    fn test_delivery_indicators_need_a_delivery_date() {
        let mut p = aged(25);
        p.delivery_outcome = Some(DeliveryOutcome::FullTerm);
        p.gravida = Some(1);
        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::Deliveries), 0);
        assert_eq!(c.count_of(Indicator::FirstBirth), 0);
    }

    #[test]
    fn test_postpartum_completion_from_any_source() {
        let mut p = aged(25);
        p.postpartum_ifa_count = Some(90);
        p.is_4pnc_completed = CompletionFlag::Text("Yes".to_string());
        p.vit_a_completed_date = Some(d(10, 1));
        p.pnc_contacts.set(1, Some(d(9, 2)));
        p.pnc_contacts.set(2, Some(d(9, 9)));

        let c = evaluate_patient(&p).unwrap().unwrap();
        assert_eq!(c.count_of(Indicator::PostpartumIfa), 1);
        assert_eq!(c.count_of(Indicator::Pnc4), 1);
        assert_eq!(c.count_of(Indicator::Pnc2), 1);
        assert_eq!(c.count_of(Indicator::VitA), 1);
    }

    #[test]
    fn test_malformed_inputs_are_errors() {
        let mut p = aged(25);
        p.supplements_ifa = vec![SupplementLog::new(d(1, 1), u32::MAX), SupplementLog::new(d(1, 2), 1)];
        assert!(matches!(evaluate_patient(&p), Err(RegistryError::MalformedRecord { .. })));

        let mut p = aged(25);
        p.delivery_date = Some(d(9, 1));
        p.delivery_outcome = Some(DeliveryOutcome::FullTerm);
        p.baby_details = vec![BabyDetail::default(); MAX_BABIES + 1];
        assert!(matches!(evaluate_patient(&p), Err(RegistryError::MalformedRecord { .. })));
    }
}
