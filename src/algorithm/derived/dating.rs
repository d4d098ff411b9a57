//! Pregnancy dating from the last menstrual period

use std::fmt;

use chrono::{Days, NaiveDate};

use super::{EDC_OFFSET_DAYS, MAX_AOG_WEEKS};
use crate::models::Trimester;

/// Estimated date of confinement: LMP + 280 days
///
/// # Arguments
/// * `lmp` - Last menstrual period, if recorded
///
/// # Returns
/// The due date, or `None` when the LMP is absent
#[must_use]
pub fn estimated_due_date(lmp: Option<NaiveDate>) -> Option<NaiveDate> {
    lmp?.checked_add_days(Days::new(EDC_OFFSET_DAYS))
}

/// Age of gestation at a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestationalAge {
    /// Reference date on or after the LMP
    Valid {
        /// Completed weeks, capped at 43
        weeks: u32,
        /// Remaining days, 0..=6
        days: u32,
        /// Completed weeks without the cap
        raw_weeks: u32,
        /// Trimester for the capped weeks
        trimester: Trimester,
    },
    /// Reference date before the LMP
    Invalid,
}

impl GestationalAge {
    /// Trimester, absent for the invalid sentinel
    #[must_use]
    pub const fn trimester(&self) -> Option<Trimester> {
        match self {
            Self::Valid { trimester, .. } => Some(*trimester),
            Self::Invalid => None,
        }
    }

    /// Capped completed weeks
    #[must_use]
    pub const fn weeks(&self) -> Option<u32> {
        match self {
            Self::Valid { weeks, .. } => Some(*weeks),
            Self::Invalid => None,
        }
    }

    /// Uncapped completed weeks
    #[must_use]
    pub const fn raw_weeks(&self) -> Option<u32> {
        match self {
            Self::Valid { raw_weeks, .. } => Some(*raw_weeks),
            Self::Invalid => None,
        }
    }

    /// Whether the raw value exceeded the 43-week ceiling
    #[must_use]
    pub const fn is_capped(&self) -> bool {
        matches!(self, Self::Valid { raw_weeks, .. } if *raw_weeks > MAX_AOG_WEEKS)
    }
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid { weeks, days, .. } => write!(f, "{weeks} weeks {days} days"),
            Self::Invalid => f.write_str("Invalid"),
        }
    }
}

/// Age of gestation at `reference`, floored to whole weeks and days
///
/// Returns `None` when either date is absent and the `Invalid` sentinel when
/// the reference precedes the LMP.
#[must_use]
pub fn gestational_age(
    lmp: Option<NaiveDate>,
    reference: Option<NaiveDate>,
) -> Option<GestationalAge> {
    let (lmp, reference) = (lmp?, reference?);
    let elapsed = (reference - lmp).num_days();
    let Ok(elapsed) = u32::try_from(elapsed) else {
        return Some(GestationalAge::Invalid);
    };
    let raw_weeks = elapsed / 7;
    let weeks = raw_weeks.min(MAX_AOG_WEEKS);
    Some(GestationalAge::Valid {
        weeks,
        days: elapsed % 7,
        raw_weeks,
        trimester: Trimester::from_weeks(weeks),
    })
}

/// Uncapped completed weeks, for validation
#[must_use]
pub fn raw_gestational_weeks(lmp: Option<NaiveDate>, reference: Option<NaiveDate>) -> Option<u32> {
    gestational_age(lmp, reference).and_then(|aog| aog.raw_weeks())
}

/// Completed weeks capped at 43, for display and reporting rules
#[must_use]
pub fn gestational_weeks(lmp: Option<NaiveDate>, reference: Option<NaiveDate>) -> Option<u32> {
    gestational_age(lmp, reference).and_then(|aog| aog.weeks())
}
