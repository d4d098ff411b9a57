//! Coded value types stored on maternal records
//!
//! Every code is stored as the exact text the data-entry forms write; the
//! serde representation of each variant matches that text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pregnancy trimester of a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trimester {
    /// Up to and including week 13
    #[serde(rename = "1st Trimester", alias = "1st")]
    First,
    /// Weeks 14 to 27
    #[serde(rename = "2nd Trimester", alias = "2nd")]
    Second,
    /// Week 28 onward
    #[serde(rename = "3rd Trimester", alias = "3rd")]
    Third,
}

impl Trimester {
    /// Trimester for a number of completed gestational weeks
    #[must_use]
    pub const fn from_weeks(weeks: u32) -> Self {
        if weeks > 27 {
            Self::Third
        } else if weeks > 13 {
            Self::Second
        } else {
            Self::First
        }
    }

    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::First => "1st Trimester",
            Self::Second => "2nd Trimester",
            Self::Third => "3rd Trimester",
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI classification of a prenatal visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BmiCategory {
    /// Below 18.5
    Low,
    /// 18.5 up to 25
    Normal,
    /// 25 and above
    High,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Low
        } else if bmi < 25.0 {
            Self::Normal
        } else {
            Self::High
        }
    }

    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Birth weight classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirthWeightCategory {
    /// 2500 g or more
    Normal,
    /// Under 2500 g
    Low,
    /// Weight was not recorded
    Unknown,
}

impl BirthWeightCategory {
    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for BirthWeightCategory {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "normal" => Self::Normal,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }
}

/// Sex of a newborn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male newborn
    Male,
    /// Female newborn
    Female,
}

impl Sex {
    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Outcome of the pregnancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// Full-term live birth
    #[serde(rename = "FT")]
    FullTerm,
    /// Pre-term live birth
    #[serde(rename = "PT")]
    PreTerm,
    /// Fetal death
    #[serde(rename = "FD")]
    FetalDeath,
    /// Abortion or miscarriage
    #[serde(rename = "AB")]
    Abortion,
}

impl DeliveryOutcome {
    /// Whether the outcome produced live infants
    #[must_use]
    pub const fn is_live_birth(&self) -> bool {
        matches!(self, Self::FullTerm | Self::PreTerm)
    }

    /// Stored code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FullTerm => "FT",
            Self::PreTerm => "PT",
            Self::FetalDeath => "FD",
            Self::Abortion => "AB",
        }
    }
}

/// How the delivery happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Cesarean section
    #[serde(rename = "CS")]
    Cesarean,
    /// Vaginal delivery
    #[serde(rename = "VD")]
    Vaginal,
    /// Combined vaginal and cesarean delivery of multiple infants
    #[serde(rename = "CVCD")]
    CombinedVaginalCesarean,
}

impl DeliveryMode {
    /// Stored code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cesarean => "CS",
            Self::Vaginal => "VD",
            Self::CombinedVaginalCesarean => "CVCD",
        }
    }
}

/// Health worker attending the delivery
///
/// Free-text attendants are stored as `Others: <description>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attendant {
    /// Medical doctor
    Doctor,
    /// Nurse
    Nurse,
    /// Midwife
    Midwife,
    /// Anyone else, with the recorded description
    Other(String),
}

const OTHERS_PREFIX: &str = "Others: ";

impl From<&str> for Attendant {
    fn from(s: &str) -> Self {
        match s.trim() {
            "MD" => Self::Doctor,
            "RN" => Self::Nurse,
            "MW" => Self::Midwife,
            other => Self::Other(
                other
                    .strip_prefix(OTHERS_PREFIX)
                    .or_else(|| other.strip_prefix("Others"))
                    .unwrap_or(other)
                    .trim()
                    .to_string(),
            ),
        }
    }
}

impl fmt::Display for Attendant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctor => f.write_str("MD"),
            Self::Nurse => f.write_str("RN"),
            Self::Midwife => f.write_str("MW"),
            Self::Other(description) => write!(f, "{OTHERS_PREFIX}{description}"),
        }
    }
}

impl Serialize for Attendant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Attendant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Kind of place the delivery happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    /// Public health facility
    Public,
    /// Private health facility
    Private,
    /// Home or any place that is not a health facility
    #[serde(rename = "Non-Health Facility")]
    NonHealthFacility,
}

impl FacilityType {
    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::NonHealthFacility => "Non-Health Facility",
        }
    }
}

/// Number of fetuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PregnancyType {
    /// One infant
    Singleton,
    /// Two infants
    Twins,
    /// Three or more, count recorded separately
    Multiple,
}

impl PregnancyType {
    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Twins => "Twins",
            Self::Multiple => "Multiple",
        }
    }
}

/// Laboratory screening performed during pregnancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabTestType {
    /// Complete blood count, screens for anemia
    #[serde(rename = "CBC")]
    Cbc,
    /// Gestational diabetes screening
    #[serde(rename = "Gestational Diabetes")]
    GestationalDiabetes,
    /// Syphilis screening
    Syphilis,
    /// HIV screening
    #[serde(rename = "HIV")]
    Hiv,
    /// Hepatitis B screening
    #[serde(rename = "Hep B")]
    HepatitisB,
}

impl LabTestType {
    /// All screening types in report order
    pub const ALL: [Self; 5] = [
        Self::Syphilis,
        Self::HepatitisB,
        Self::Hiv,
        Self::Cbc,
        Self::GestationalDiabetes,
    ];

    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cbc => "CBC",
            Self::GestationalDiabetes => "Gestational Diabetes",
            Self::Syphilis => "Syphilis",
            Self::Hiv => "HIV",
            Self::HepatitisB => "Hep B",
        }
    }

    /// Whether a structured lab result counts as a positive finding for this test
    #[must_use]
    pub const fn is_positive(&self, result: LabResult) -> bool {
        match self {
            Self::Cbc => matches!(result, LabResult::WithAnemia),
            _ => matches!(result, LabResult::Positive | LabResult::Reactive),
        }
    }

    /// Whether a legacy flat result text counts as positive for this test
    #[must_use]
    pub fn is_positive_legacy(&self, result: &str) -> bool {
        let result = result.trim();
        match self {
            Self::Syphilis | Self::HepatitisB | Self::Hiv => result == "Reactive",
            Self::Cbc => result == "With Anemia",
            Self::GestationalDiabetes => result == "Positive",
        }
    }
}

/// Result recorded for a laboratory screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabResult {
    /// Positive finding
    Positive,
    /// Negative finding
    Negative,
    /// Reactive (legacy serology wording)
    Reactive,
    /// Non-reactive (legacy serology wording)
    #[serde(rename = "Non-Reactive", alias = "Non-reactive")]
    NonReactive,
    /// CBC shows anemia
    #[serde(rename = "With Anemia")]
    WithAnemia,
    /// CBC shows no anemia
    #[serde(rename = "Without Anemia")]
    WithoutAnemia,
    /// Patient declined to disclose
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl LabResult {
    /// Stored label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Reactive => "Reactive",
            Self::NonReactive => "Non-Reactive",
            Self::WithAnemia => "With Anemia",
            Self::WithoutAnemia => "Without Anemia",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

/// Prenatal micronutrient supplement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementKind {
    /// Iron with folic acid
    Ifa,
    /// Multiple micronutrient supplement
    Mms,
    /// Calcium carbonate
    Calcium,
}

impl SupplementKind {
    /// All supplement kinds
    pub const ALL: [Self; 3] = [Self::Ifa, Self::Mms, Self::Calcium];

    /// Field name of the log list on a stored record
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Ifa => "supplements_ifa",
            Self::Mms => "supplements_mms",
            Self::Calcium => "supplements_calcium",
        }
    }
}

impl From<&str> for SupplementKind {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mms" | "supplements_mms" => Self::Mms,
            "calcium" | "supplements_calcium" => Self::Calcium,
            _ => Self::Ifa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimester_boundaries() {
        assert_eq!(Trimester::from_weeks(13), Trimester::First);
        assert_eq!(Trimester::from_weeks(14), Trimester::Second);
        assert_eq!(Trimester::from_weeks(27), Trimester::Second);
        assert_eq!(Trimester::from_weeks(28), Trimester::Third);
    }

    #[test]
    fn test_attendant_others_round_trip() {
        let attendant = Attendant::from("Others: Hilot");
        assert_eq!(attendant, Attendant::Other("Hilot".to_string()));
        assert_eq!(attendant.to_string(), "Others: Hilot");
        assert_eq!(Attendant::from("MW"), Attendant::Midwife);
    }

    #[test]
    fn test_codes_deserialize_from_stored_text() {
        let outcome: DeliveryOutcome = serde_json::from_str("\"PT\"").unwrap();
        assert!(outcome.is_live_birth());
        let facility: FacilityType = serde_json::from_str("\"Non-Health Facility\"").unwrap();
        assert_eq!(facility, FacilityType::NonHealthFacility);
        let test: LabTestType = serde_json::from_str("\"Hep B\"").unwrap();
        assert_eq!(test, LabTestType::HepatitisB);
    }

    #[test]
    fn test_lab_positivity_vocabulary() {
        assert!(LabTestType::Cbc.is_positive(LabResult::WithAnemia));
        assert!(!LabTestType::Cbc.is_positive(LabResult::Positive));
        assert!(LabTestType::Syphilis.is_positive(LabResult::Positive));
        assert!(LabTestType::Syphilis.is_positive_legacy("Reactive"));
        assert!(!LabTestType::GestationalDiabetes.is_positive_legacy("Reactive"));
    }
}
