//! Domain models for maternal case records
//!
//! This module contains the patient aggregate, its ordered sub-collections
//! and the coded values stored on them.

pub mod baby;
pub mod flags;
pub mod lenient;
pub mod logs;
pub mod patient;
pub mod slots;
pub mod types;
pub mod visit;

// Re-export commonly used types
pub use baby::BabyDetail;
pub use flags::CompletionFlag;
pub use logs::{Dated, DatedCount, LabLog, PostpartumLog, SupplementLog};
pub use patient::Patient;
pub use slots::{PncContacts, PositionalSlots, TdDoses};
pub use types::{
    Attendant, BirthWeightCategory, BmiCategory, DeliveryMode, DeliveryOutcome, FacilityType,
    LabResult, LabTestType, PregnancyType, Sex, SupplementKind, Trimester,
};
pub use visit::PrenatalVisit;
