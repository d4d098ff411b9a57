//! Prenatal check-up entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::logs::Dated;
use super::types::{BmiCategory, Trimester};

/// One prenatal check-up
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrenatalVisit {
    /// Date of the check-up
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Weight in kilograms
    #[serde(default, deserialize_with = "lenient::measure")]
    pub weight: Option<f64>,
    /// Height in centimetres
    #[serde(default, deserialize_with = "lenient::measure")]
    pub height: Option<f64>,
    /// BMI, one decimal
    #[serde(default, deserialize_with = "lenient::measure")]
    pub bmi: Option<f64>,
    /// BMI classification, present only with both weight and height
    #[serde(default, deserialize_with = "lenient::code")]
    pub bmi_category: Option<BmiCategory>,
    /// Age of gestation at the visit, e.g. `"12 weeks 3 days"` or `"Invalid"`
    #[serde(default, deserialize_with = "lenient::text")]
    pub aog: Option<String>,
    /// Trimester at the visit
    #[serde(default, deserialize_with = "lenient::code")]
    pub trimester: Option<Trimester>,
    /// Free-text remarks
    #[serde(default, deserialize_with = "lenient::text")]
    pub remarks: Option<String>,
}

impl PrenatalVisit {
    /// A visit on a date with measurements; derived fields are filled in by the validator
    #[must_use]
    pub fn new(date: NaiveDate, weight: Option<f64>, height: Option<f64>) -> Self {
        Self {
            date: Some(date),
            weight,
            height,
            ..Self::default()
        }
    }

    /// Whether the visit was recorded as falling in the first trimester
    #[must_use]
    pub fn is_first_trimester(&self) -> bool {
        self.trimester == Some(Trimester::First)
    }
}

impl Dated for PrenatalVisit {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}
