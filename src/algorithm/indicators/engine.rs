//! Aggregation of indicator contributions over a patient set

use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::counts::{BandCounts, IndicatorReport};
use super::indicator::Indicator;
use super::rules::{PatientContribution, evaluate_patient};
use crate::config::ReportConfig;
use crate::models::Patient;
use crate::utils::logging::{create_record_progress_bar, finish_progress_bar};

enum Outcome {
    Counted(PatientContribution),
    Excluded,
    Skipped,
}

fn outcome(patient: &Patient) -> Outcome {
    match evaluate_patient(patient) {
        Ok(Some(contribution)) => Outcome::Counted(contribution),
        Ok(None) => Outcome::Excluded,
        Err(e) => {
            log::warn!("Skipping patient {} in indicator report: {e}", patient.label());
            Outcome::Skipped
        }
    }
}

#[derive(Default)]
struct Tally {
    counts: FxHashMap<Indicator, BandCounts>,
    counted: usize,
    skipped: usize,
}

impl Tally {
    fn absorb(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Counted(contribution) => {
                self.counted += 1;
                for indicator in contribution.indicators {
                    self.counts.entry(indicator).or_default().increment(contribution.band);
                }
            }
            Outcome::Excluded => {}
            Outcome::Skipped => self.skipped += 1,
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        for (indicator, counts) in other.counts {
            self.counts.entry(indicator).or_default().merge(&counts);
        }
        self.counted += other.counted;
        self.skipped += other.skipped;
        self
    }
}

/// Computes the FHSIS indicator table for a pre-filtered patient set
///
/// Patients are independent, so the pass is a map-reduce. With
/// `ReportConfig::parallel` it runs on rayon, otherwise sequentially; both
/// produce the same report.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: ReportConfig,
}

impl IndicatorEngine {
    #[must_use]
    pub const fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Aggregate indicators over `patients`
    ///
    /// Patients outside the reporting age bands add nothing. Malformed
    /// patients are logged and counted in [`IndicatorReport::skipped`].
    #[must_use]
    pub fn aggregate(&self, patients: &[Patient]) -> IndicatorReport {
        let start = Instant::now();
        let pb = create_record_progress_bar(
            patients.len() as u64,
            Some("Aggregating indicators"),
            self.config.show_progress,
        );

        let tally = if self.config.parallel {
            self.aggregate_parallel(patients, &pb)
        } else {
            patients
                .iter()
                .map(|p| {
                    pb.inc(1);
                    outcome(p)
                })
                .fold(Tally::default(), Tally::absorb)
        };

        finish_progress_bar(&pb, Some("Indicators aggregated"));
        log::info!(
            "Aggregated indicators over {} patients ({} counted, {} skipped) in {:?}",
            patients.len(),
            tally.counted,
            tally.skipped,
            start.elapsed()
        );
        IndicatorReport::from_parts(tally.counts, tally.counted, tally.skipped)
    }

    fn aggregate_parallel(&self, patients: &[Patient], pb: &ProgressBar) -> Tally {
        let run = || {
            patients
                .par_iter()
                .map(|p| {
                    pb.inc(1);
                    outcome(p)
                })
                .fold(Tally::default, Tally::absorb)
                .reduce(Tally::default, Tally::merge)
        };

        match self.config.num_threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => {
                    log::debug!("Aggregating on a dedicated pool of {threads} threads");
                    pool.install(run)
                }
                Err(e) => {
                    log::warn!("Could not build a {threads}-thread pool, using the global pool: {e}");
                    run()
                }
            },
            None => run(),
        }
    }
}

/// Aggregate with the given configuration
#[must_use]
pub fn aggregate(patients: &[Patient], config: &ReportConfig) -> IndicatorReport {
    IndicatorEngine::new(config.clone()).aggregate(patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::derived::AgeBand;
    use crate::models::SupplementLog;
    use chrono::NaiveDate;

    fn patient(age: u32, visits: usize) -> Patient {
        let mut p = Patient::new("Ana", "Reyes");
        p.age = Some(age);
        for i in 0..visits {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap();
            p.prenatal_visits.push(crate::models::PrenatalVisit::new(date, Some(55.0), None));
        }
        p
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let patients: Vec<_> = (0..200).map(|i| patient(10 + (i % 45), (i % 6) as usize)).collect();
        let sequential = IndicatorEngine::new(ReportConfig { parallel: false, ..ReportConfig::default() });
        let parallel = IndicatorEngine::new(ReportConfig {
            num_threads: Some(3),
            ..ReportConfig::default()
        });
        assert_eq!(sequential.aggregate(&patients), parallel.aggregate(&patients));
    }

    #[test]
    fn test_skipped_patients_are_reported() {
        let mut bad = patient(20, 4);
        bad.supplements_ifa = vec![
            SupplementLog::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), u32::MAX),
            SupplementLog::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 5),
        ];
        let report = IndicatorEngine::default().aggregate(&[bad, patient(20, 4), patient(60, 4)]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.counted, 1);
        let visits4 = report.get(Indicator::Visits4);
        assert_eq!(visits4.band(AgeBand::Band20To49), 1);
        assert_eq!(visits4.total, 1);
    }

    #[test]
    fn test_empty_input_gives_zero_report() {
        let report = IndicatorEngine::default().aggregate(&[]);
        assert!(report.rows().all(|(_, c)| c == BandCounts::default()));
    }
}
