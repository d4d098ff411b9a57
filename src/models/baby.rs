//! Newborn details recorded at delivery

use serde::{Deserialize, Serialize};

use super::lenient;
use super::types::{BirthWeightCategory, Sex};

/// Weight and sex of one live-born infant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BabyDetail {
    /// Birth weight in grams
    #[serde(default, deserialize_with = "lenient::measure")]
    pub weight: Option<f64>,
    /// Category derived from the weight
    #[serde(default, deserialize_with = "lenient::code")]
    pub category: Option<BirthWeightCategory>,
    /// Sex of the infant
    #[serde(default, deserialize_with = "lenient::code")]
    pub sex: Option<Sex>,
}

impl BabyDetail {
    /// Category used for reporting: missing categories count as unknown weight
    #[must_use]
    pub fn reporting_category(&self) -> BirthWeightCategory {
        self.category.unwrap_or(BirthWeightCategory::Unknown)
    }
}
