//! Age-stratified counters and the aggregated report

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::indicator::Indicator;
use crate::algorithm::derived::AgeBand;

/// Counts for one indicator in each reporting age band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BandCounts {
    pub band_10_14: u64,
    pub band_15_19: u64,
    pub band_20_49: u64,
    /// Sum of the three bands
    pub total: u64,
}

impl BandCounts {
    /// Count one occurrence in `band`
    pub fn increment(&mut self, band: AgeBand) {
        match band {
            AgeBand::Band10To14 => self.band_10_14 += 1,
            AgeBand::Band15To19 => self.band_15_19 += 1,
            AgeBand::Band20To49 => self.band_20_49 += 1,
        }
        self.total += 1;
    }

    /// Add another set of counts
    pub fn merge(&mut self, other: &Self) {
        self.band_10_14 += other.band_10_14;
        self.band_15_19 += other.band_15_19;
        self.band_20_49 += other.band_20_49;
        self.total += other.total;
    }

    /// Count for one band
    #[must_use]
    pub const fn band(&self, band: AgeBand) -> u64 {
        match band {
            AgeBand::Band10To14 => self.band_10_14,
            AgeBand::Band15To19 => self.band_15_19,
            AgeBand::Band20To49 => self.band_20_49,
        }
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndicatorReport {
    counts: FxHashMap<Indicator, BandCounts>,
    /// Patients that contributed to at least the age-band check
    pub counted: usize,
    /// Patients skipped as malformed
    pub skipped: usize,
}

impl IndicatorReport {
    pub(crate) fn from_parts(
        counts: FxHashMap<Indicator, BandCounts>,
        counted: usize,
        skipped: usize,
    ) -> Self {
        Self {
            counts,
            counted,
            skipped,
        }
    }

    /// Counts for an indicator; all zero when nothing was counted
    #[must_use]
    pub fn get(&self, indicator: Indicator) -> BandCounts {
        self.counts.get(&indicator).copied().unwrap_or_default()
    }

    /// Every indicator with its counts, in report order
    pub fn rows(&self) -> impl Iterator<Item = (Indicator, BandCounts)> + '_ {
        Indicator::ALL.iter().map(|i| (*i, self.get(*i)))
    }

    /// `indicator_key -> counts` for every indicator
    #[must_use]
    pub fn as_named_map(&self) -> BTreeMap<&'static str, BandCounts> {
        self.rows().map(|(i, c)| (i.key(), c)).collect()
    }
}

impl fmt::Display for IndicatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Indicator Report ({} counted, {} skipped):", self.counted, self.skipped)?;
        writeln!(
            f,
            "  {:<20} {:>6} {:>6} {:>6} {:>6}",
            "indicator", "10-14", "15-19", "20-49", "total"
        )?;
        for (indicator, counts) in self.rows() {
            writeln!(
                f,
                "  {:<20} {:>6} {:>6} {:>6} {:>6}",
                indicator.key(),
                counts.band_10_14,
                counts.band_15_19,
                counts.band_20_49,
                counts.total
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_keeps_total() {
        let mut counts = BandCounts::default();
        counts.increment(AgeBand::Band10To14);
        counts.increment(AgeBand::Band20To49);
        counts.increment(AgeBand::Band20To49);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.band(AgeBand::Band20To49), 2);

        let mut sum = BandCounts::default();
        sum.merge(&counts);
        sum.merge(&counts);
        assert_eq!(sum.total, 6);
        assert_eq!(sum.band_10_14, 2);
    }

    #[test]
    fn test_missing_indicator_reads_zero() {
        let report = IndicatorReport::default();
        assert_eq!(report.get(Indicator::Iron), BandCounts::default());
        assert_eq!(report.as_named_map().len(), Indicator::ALL.len());
    }
}
