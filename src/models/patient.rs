//! Patient aggregate
//!
//! A `Patient` is one maternal case record: identity, pregnancy dating, the
//! six ordered sub-collections and the delivery and postpartum outcome. The
//! serde layout matches the stored record, so records written by earlier
//! versions of the forms still load; unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::baby::BabyDetail;
use super::flags::CompletionFlag;
use super::lenient;
use super::logs::{LabLog, PostpartumLog, SupplementLog};
use super::slots::{PncContacts, TdDoses};
use super::types::{
    Attendant, BirthWeightCategory, BmiCategory, DeliveryMode, DeliveryOutcome, FacilityType,
    LabTestType, PregnancyType, Sex, SupplementKind, Trimester,
};
use super::visit::PrenatalVisit;

/// Maternal case record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Patient {
    // Identity
    /// Opaque record identifier assigned by the store
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub middle_name: Option<String>,
    /// Age in years at registration
    #[serde(default, deserialize_with = "lenient::count")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub barangay: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sitio: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date_of_registration: Option<NaiveDate>,
    /// Creation timestamp as stored
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    /// Last update timestamp as stored
    #[serde(default, deserialize_with = "lenient::text")]
    pub updated_at: Option<String>,

    // Risk
    /// Set by a reviewer, never derived from the risk factors
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_high_risk: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub high_risk_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_hypertension: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_gestational_diabetes: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_advanced_maternal_age: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_multiple_gestation: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_multiple_miscarriages: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_obesity: bool,

    // Pregnancy dating
    /// Last menstrual period
    #[serde(default, deserialize_with = "lenient::date")]
    pub lmp: Option<NaiveDate>,
    /// Estimated date of confinement, LMP + 280 days
    #[serde(default, deserialize_with = "lenient::date")]
    pub edc: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub aog: Option<String>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub trimester: Option<Trimester>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub gravida: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub parity: Option<u32>,

    // Latest anthropometrics, copied from the latest visit on save
    #[serde(default, deserialize_with = "lenient::measure")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub bmi: Option<f64>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub bmi_category: Option<BmiCategory>,

    // Ordered sub-collections
    #[serde(default, deserialize_with = "lenient::list")]
    pub prenatal_visits: Vec<PrenatalVisit>,
    #[serde(flatten)]
    pub td_doses: TdDoses,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub td_completed_previously: bool,
    #[serde(default, deserialize_with = "lenient::list")]
    pub supplements_ifa: Vec<SupplementLog>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub supplements_mms: Vec<SupplementLog>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub supplements_calcium: Vec<SupplementLog>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub lab_logs: Vec<LabLog>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub postpartum_logs: Vec<PostpartumLog>,
    #[serde(flatten)]
    pub pnc_contacts: PncContacts,

    // Other prenatal care
    /// High-risk only
    #[serde(default, deserialize_with = "lenient::flag")]
    pub calcium_carbonate_completed: CompletionFlag,
    #[serde(default, deserialize_with = "lenient::date")]
    pub deworming_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_deworming_given: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lab_syphilis_result: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lab_hepb_result: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lab_hiv_result: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lab_cbc_result: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lab_diabetes_result: Option<String>,

    // Delivery
    #[serde(default, deserialize_with = "lenient::date")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub delivery_outcome: Option<DeliveryOutcome>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pregnancy_outcome_remarks: Option<String>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub pregnancy_type: Option<PregnancyType>,
    /// Number of infants when the pregnancy type is `Multiple`
    #[serde(default, deserialize_with = "lenient::count")]
    pub pregnancy_multiple_count: Option<u32>,
    /// Baby 1 weight in grams, mirrored from `baby_details`
    #[serde(default, deserialize_with = "lenient::measure")]
    pub birth_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub birth_weight_category: Option<BirthWeightCategory>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub birth_sex: Option<Sex>,
    /// One entry per live-born infant; empty unless the outcome is a live birth
    #[serde(default, deserialize_with = "lenient::list")]
    pub baby_details: Vec<BabyDetail>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub delivery_mode: Option<DeliveryMode>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub delivery_attendant: Option<Attendant>,
    #[serde(default, deserialize_with = "lenient::code")]
    pub delivery_facility_type: Option<FacilityType>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_place: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_non_health_place: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_place_capable: Option<String>,

    // Postpartum
    #[serde(default, deserialize_with = "lenient::text")]
    pub pnc_remarks: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_4pnc_completed: CompletionFlag,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_postpartum_ifa_completed: CompletionFlag,
    /// Date the cumulative postpartum IFA count reached 90
    #[serde(default, deserialize_with = "lenient::date")]
    pub postpartum_ifa_completed_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub postpartum_ifa_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_vit_a_completed: CompletionFlag,
    #[serde(default, deserialize_with = "lenient::date")]
    pub vit_a_completed_date: Option<NaiveDate>,
}

impl Patient {
    /// Create an empty record with a name
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// `Last, First` display name
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name.trim(), self.first_name.trim())
    }

    /// Identifier, or the display name for records not yet stored
    #[must_use]
    pub fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.display_name())
    }

    /// Log list for a supplement kind
    #[must_use]
    pub fn supplement_log(&self, kind: SupplementKind) -> &[SupplementLog] {
        match kind {
            SupplementKind::Ifa => &self.supplements_ifa,
            SupplementKind::Mms => &self.supplements_mms,
            SupplementKind::Calcium => &self.supplements_calcium,
        }
    }

    /// Mutable log list for a supplement kind
    pub fn supplement_log_mut(&mut self, kind: SupplementKind) -> &mut Vec<SupplementLog> {
        match kind {
            SupplementKind::Ifa => &mut self.supplements_ifa,
            SupplementKind::Mms => &mut self.supplements_mms,
            SupplementKind::Calcium => &mut self.supplements_calcium,
        }
    }

    /// Whether the recorded outcome is a live birth
    #[must_use]
    pub fn is_live_birth(&self) -> bool {
        self.delivery_outcome.is_some_and(|o| o.is_live_birth())
    }

    /// Whether a delivery or pregnancy outcome has been recorded
    #[must_use]
    pub fn has_delivered(&self) -> bool {
        self.delivery_date.is_some() || self.delivery_outcome.is_some()
    }

    /// Date part of the creation timestamp
    #[must_use]
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(lenient::parse_date)
    }

    /// Legacy flat lab result for a screening type
    #[must_use]
    pub fn legacy_lab_result(&self, test: LabTestType) -> Option<&str> {
        let value = match test {
            LabTestType::Syphilis => &self.lab_syphilis_result,
            LabTestType::HepatitisB => &self.lab_hepb_result,
            LabTestType::Hiv => &self.lab_hiv_result,
            LabTestType::Cbc => &self.lab_cbc_result,
            LabTestType::GestationalDiabetes => &self.lab_diabetes_result,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{
        "id": "a1",
        "first_name": "Maria",
        "last_name": "Santos",
        "age": "24",
        "barangay": "Alangilan",
        "lmp": "2024-01-01",
        "gravida": 2,
        "parity": "1",
        "td1": "2024-01-20",
        "td2": "",
        "td3": "2024-03-01T00:00:00.000Z",
        "pnc_date_1": null,
        "prenatal_visits": [
            {"date": "2024-02-01", "weight": "55", "height": 160, "trimester": "1st Trimester", "bmi_category": "NORMAL"}
        ],
        "supplements_ifa": [{"date": "2024-02-01", "count": "30"}],
        "supplements_mms": null,
        "lab_logs": [{"type": "Hep B", "date": "2024-02-01", "result": "Negative"}],
        "delivery_outcome": "XX",
        "delivery_attendant": "Others: Hilot",
        "is_4pnc_completed": "Yes",
        "calcium_carbonate_completed": true,
        "legacy_column_nobody_reads": 3
    }"#;

    #[test]
    fn test_stored_record_decodes_leniently() {
        let p: Patient = serde_json::from_str(STORED).unwrap();
        assert_eq!(p.age, Some(24));
        assert_eq!(p.gravida, Some(2));
        assert_eq!(p.parity, Some(1));
        assert_eq!(p.td_doses.get(1), NaiveDate::from_ymd_opt(2024, 1, 20));
        assert_eq!(p.td_doses.get(2), None);
        assert_eq!(p.td_doses.get(3), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(p.prenatal_visits[0].weight, Some(55.0));
        assert!(p.prenatal_visits[0].is_first_trimester());
        assert_eq!(p.supplements_ifa[0].count, Some(30));
        assert!(p.supplements_mms.is_empty());
        assert_eq!(p.lab_logs[0].test_type, Some(LabTestType::HepatitisB));
        assert_eq!(p.delivery_outcome, None);
        assert_eq!(p.delivery_attendant, Some(Attendant::Other("Hilot".to_string())));
        assert!(p.is_4pnc_completed.is_set());
        assert!(p.calcium_carbonate_completed.is_set());
    }

    #[test]
    fn test_serialises_flat_slots() {
        let p: Patient = serde_json::from_str(STORED).unwrap();
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["td1"], "2024-01-20");
        assert_eq!(value["lab_logs"][0]["type"], "Hep B");
        assert_eq!(value["delivery_attendant"], "Others: Hilot");
        let again: Patient = serde_json::from_value(value).unwrap();
        assert_eq!(again, p);
    }
}
