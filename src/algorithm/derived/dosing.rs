//! Immunization and supplement progress

use std::fmt;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::models::{DatedCount, TdDoses};

/// Doses counted on the immunization card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseCount {
    /// Highest populated TD slot
    Doses(u8),
    /// Series completed during an earlier pregnancy
    CompletedPreviously,
}

impl fmt::Display for DoseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doses(n) => write!(f, "{n}"),
            Self::CompletedPreviously => f.write_str("Completed (Prev)"),
        }
    }
}

/// TD immunization progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseStatus {
    pub count: DoseCount,
    /// Whether the five-dose series is complete
    pub completed: bool,
}

/// TD immunization progress from the positional slots
///
/// The count is the highest populated slot, so a gap (td1 and td3 set) still
/// counts three doses.
#[must_use]
pub fn dose_status(doses: &TdDoses, completed_previously: bool) -> DoseStatus {
    if completed_previously {
        return DoseStatus {
            count: DoseCount::CompletedPreviously,
            completed: true,
        };
    }
    let highest = doses.highest_populated();
    DoseStatus {
        count: DoseCount::Doses(u8::try_from(highest).unwrap_or(u8::MAX)),
        completed: doses.get(TdDoses::LEN).is_some(),
    }
}

/// Date on which the cumulative count first reaches `threshold`
///
/// Entries are taken in date order; undated entries are ignored.
#[must_use]
pub fn threshold_completion_date<T: DatedCount>(logs: &[T], threshold: u32) -> Option<NaiveDate> {
    let mut total: u64 = 0;
    for (date, count) in logs
        .iter()
        .filter_map(|log| log.date().map(|d| (d, log.count())))
        .sorted_by_key(|(date, _)| *date)
    {
        total += u64::from(count);
        if total >= u64::from(threshold) {
            return Some(date);
        }
    }
    None
}

/// Sum of all recorded counts, `None` when the sum overflows
#[must_use]
pub fn running_total<T: DatedCount>(logs: &[T]) -> Option<u32> {
    logs.iter().try_fold(0u32, |acc, log| acc.checked_add(log.count()))
}

/// Progress toward a goal as a percentage capped at 100
#[must_use]
pub fn progress_percent(total: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (f64::from(total) / f64::from(goal) * 100.0).min(100.0)
}
