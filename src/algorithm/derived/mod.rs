//! Derived-field calculations
//!
//! Stateless functions recomputing the fields that follow from recorded data:
//! due date, age of gestation, BMI, birth weight category, dose progress and
//! supplement completion. Nothing here performs I/O.

pub mod dating;
pub mod dosing;
pub mod measures;

pub use dating::{
    GestationalAge, estimated_due_date, gestational_age, gestational_weeks, raw_gestational_weeks,
};
pub use dosing::{
    DoseCount, DoseStatus, dose_status, progress_percent, running_total, threshold_completion_date,
};
pub use measures::{
    AgeBand, AgeGroup, Bmi, birth_weight_category, bmi, expected_baby_count,
};

/// Days from LMP to the estimated date of confinement
pub const EDC_OFFSET_DAYS: u64 = 280;
/// Ceiling for displayed gestational weeks
pub const MAX_AOG_WEEKS: u32 = 43;
/// Prenatal iron with folic acid (or MMS) tablets for a complete course
pub const PRENATAL_SUPPLEMENT_GOAL: u32 = 180;
/// Postpartum iron with folic acid tablets for a complete course
pub const POSTPARTUM_IFA_GOAL: u32 = 90;
/// Birth weights below this many grams are low
pub const LOW_BIRTH_WEIGHT_GRAMS: f64 = 2500.0;
/// Most infants recorded for one delivery
pub const MAX_BABIES: usize = 12;
/// Prenatal visits counted as complete antenatal care
pub const ANC_COMPLETE_VISITS: usize = 4;
/// Gravida from which a mother counts as grand multigravida
pub const GRAND_MULTIGRAVIDA: u32 = 5;
