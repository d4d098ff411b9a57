//! Body mass index, birth weight, infant count and age grouping

use std::fmt;

use super::{LOW_BIRTH_WEIGHT_GRAMS, MAX_BABIES};
use crate::models::{BirthWeightCategory, BmiCategory, PregnancyType};

/// Computed body mass index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    /// BMI rounded to one decimal
    pub value: f64,
    /// Classification of the rounded value
    pub category: BmiCategory,
}

/// BMI from weight in kilograms and height in centimetres
///
/// Both inputs are required and must be positive.
#[must_use]
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<Bmi> {
    let (weight, height) = (weight_kg?, height_cm?);
    if weight <= 0.0 || height <= 0.0 {
        return None;
    }
    let metres = height / 100.0;
    let value = (weight / (metres * metres) * 10.0).round() / 10.0;
    Some(Bmi {
        value,
        category: BmiCategory::from_value(value),
    })
}

/// Birth weight category for a weight in grams
#[must_use]
pub fn birth_weight_category(grams: Option<f64>) -> Option<BirthWeightCategory> {
    grams.map(|g| {
        if g >= LOW_BIRTH_WEIGHT_GRAMS {
            BirthWeightCategory::Normal
        } else {
            BirthWeightCategory::Low
        }
    })
}

/// Number of infants expected for the recorded pregnancy type
///
/// Singleton and unknown types expect one infant, twins two, and multiple
/// pregnancies the recorded count capped at 12.
#[must_use]
pub fn expected_baby_count(pregnancy_type: Option<PregnancyType>, multiple_count: Option<u32>) -> usize {
    match pregnancy_type {
        Some(PregnancyType::Twins) => 2,
        Some(PregnancyType::Multiple) => match multiple_count {
            Some(n) if n > 0 => (n as usize).min(MAX_BABIES),
            _ => 1,
        },
        Some(PregnancyType::Singleton) | None => 1,
    }
}

/// Reporting band used by the indicator tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBand {
    /// 10 to 14 years
    Band10To14,
    /// 15 to 19 years
    Band15To19,
    /// 20 to 49 years
    Band20To49,
}

impl AgeBand {
    /// Bands in column order
    pub const ALL: [Self; 3] = [Self::Band10To14, Self::Band15To19, Self::Band20To49];

    /// Column label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Band10To14 => "10-14",
            Self::Band15To19 => "15-19",
            Self::Band20To49 => "20-49",
        }
    }

    /// Band for an age in years, `None` outside 10..=49
    #[must_use]
    pub const fn from_age(age: u32) -> Option<Self> {
        match age {
            10..=14 => Some(Self::Band10To14),
            15..=19 => Some(Self::Band15To19),
            20..=49 => Some(Self::Band20To49),
            _ => None,
        }
    }
}

/// Age group shown on case records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    /// 1 to 9 years
    Child,
    /// Within one of the reporting bands
    Reporting(AgeBand),
    /// 50 and over
    OutOfRange,
}

impl AgeGroup {
    /// Group for a recorded age; `None` when the age is missing or zero
    #[must_use]
    pub const fn from_age(age: Option<u32>) -> Option<Self> {
        match age {
            None | Some(0) => None,
            Some(1..=9) => Some(Self::Child),
            Some(a) => match AgeBand::from_age(a) {
                Some(band) => Some(Self::Reporting(band)),
                None => Some(Self::OutOfRange),
            },
        }
    }

    /// Reporting band, if any
    #[must_use]
    pub const fn band(&self) -> Option<AgeBand> {
        match self {
            Self::Reporting(band) => Some(*band),
            _ => None,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child => f.write_str("1-9 y.o"),
            Self::Reporting(band) => write!(f, "{} y.o", band.label()),
            Self::OutOfRange => f.write_str("Out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_values() {
        let normal = bmi(Some(70.0), Some(175.0)).unwrap();
        assert!((normal.value - 22.9).abs() < f64::EPSILON);
        assert_eq!(normal.category, BmiCategory::Normal);

        let low = bmi(Some(50.0), Some(175.0)).unwrap();
        assert!((low.value - 16.3).abs() < f64::EPSILON);
        assert_eq!(low.category, BmiCategory::Low);

        let high = bmi(Some(90.0), Some(160.0)).unwrap();
        assert!((high.value - 35.2).abs() < f64::EPSILON);
        assert_eq!(high.category, BmiCategory::High);
    }

    #[test]
    fn test_bmi_requires_both_inputs() {
        assert_eq!(bmi(Some(70.0), None), None);
        assert_eq!(bmi(None, Some(170.0)), None);
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn test_birth_weight_threshold() {
        assert_eq!(birth_weight_category(Some(2500.0)), Some(BirthWeightCategory::Normal));
        assert_eq!(birth_weight_category(Some(2499.0)), Some(BirthWeightCategory::Low));
        assert_eq!(birth_weight_category(None), None);
    }

    #[test]
    fn test_expected_baby_count() {
        assert_eq!(expected_baby_count(Some(PregnancyType::Singleton), None), 1);
        assert_eq!(expected_baby_count(Some(PregnancyType::Twins), Some(5)), 2);
        assert_eq!(expected_baby_count(Some(PregnancyType::Multiple), Some(4)), 4);
        assert_eq!(expected_baby_count(Some(PregnancyType::Multiple), Some(30)), 12);
        assert_eq!(expected_baby_count(Some(PregnancyType::Multiple), None), 1);
    }

    #[test]
    fn test_age_groups() {
        assert_eq!(AgeGroup::from_age(Some(12)).and_then(|g| g.band()), Some(AgeBand::Band10To14));
        assert_eq!(AgeGroup::from_age(Some(5)), Some(AgeGroup::Child));
        assert_eq!(AgeGroup::from_age(Some(52)), Some(AgeGroup::OutOfRange));
        assert_eq!(AgeGroup::from_age(None), None);
        assert_eq!(AgeGroup::from_age(Some(30)).unwrap().to_string(), "20-49 y.o");
    }
}
