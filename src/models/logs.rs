//! Dated log entries: supplements, laboratory screenings and postpartum doses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::types::{LabResult, LabTestType};

/// An entry that may carry a date
pub trait Dated {
    /// Date of the entry, if recorded
    fn date(&self) -> Option<NaiveDate>;
}

/// A dated entry that also records a quantity
pub trait DatedCount: Dated {
    /// Quantity recorded, 0 when missing
    fn count(&self) -> u32;
}

/// Tablets of a prenatal supplement given on a date
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplementLog {
    /// Date given
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Number of tablets
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: Option<u32>,
}

impl SupplementLog {
    /// New log entry
    #[must_use]
    pub const fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count: Some(count),
        }
    }
}

impl Dated for SupplementLog {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl DatedCount for SupplementLog {
    fn count(&self) -> u32 {
        self.count.unwrap_or(0)
    }
}

/// One laboratory screening
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabLog {
    /// Which test was performed
    #[serde(rename = "type", default, deserialize_with = "lenient::code")]
    pub test_type: Option<LabTestType>,
    /// Date of the test
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Recorded result
    #[serde(default, deserialize_with = "lenient::code")]
    pub result: Option<LabResult>,
}

impl LabLog {
    /// New lab entry
    #[must_use]
    pub const fn new(test_type: LabTestType, date: NaiveDate, result: LabResult) -> Self {
        Self {
            test_type: Some(test_type),
            date: Some(date),
            result: Some(result),
        }
    }

    /// Whether this entry records a positive finding for its test type
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match (self.test_type, self.result) {
            (Some(test), Some(result)) => test.is_positive(result),
            _ => false,
        }
    }
}

impl Dated for LabLog {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Postpartum iron with folic acid tablets given on a date
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostpartumLog {
    /// Date given
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Number of tablets
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: Option<u32>,
    /// Remarks such as transfer in or out
    #[serde(default, deserialize_with = "lenient::text")]
    pub remarks: Option<String>,
}

impl PostpartumLog {
    /// New log entry without remarks
    #[must_use]
    pub const fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count: Some(count),
            remarks: None,
        }
    }
}

impl Dated for PostpartumLog {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl DatedCount for PostpartumLog {
    fn count(&self) -> u32 {
        self.count.unwrap_or(0)
    }
}
