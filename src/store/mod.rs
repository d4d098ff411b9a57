//! Persistence of patient records
//!
//! [`PatientRepository`] is the storage seam; [`RecordService`] sits on top
//! of it and runs validation and finalisation before anything is written.

pub mod json;
pub mod memory;
pub mod service;

pub use json::{JsonDirRepository, read_patient_array};
pub use memory::InMemoryRepository;
pub use service::RecordService;

use crate::error::Result;
use crate::models::Patient;

/// Durable storage of patient records keyed by an opaque identifier
pub trait PatientRepository {
    /// Store a new record and return its identifier
    ///
    /// A record without an `id` is assigned a fresh one.
    fn create(&mut self, patient: Patient) -> Result<String>;

    /// Load one record
    fn get(&self, id: &str) -> Result<Patient>;

    /// Replace an existing record
    fn update(&mut self, id: &str, patient: Patient) -> Result<()>;

    /// Delete a whole record
    fn delete(&mut self, id: &str) -> Result<()>;

    /// Every stored record, ordered by name
    fn list(&self) -> Result<Vec<Patient>>;
}

/// Fresh random record identifier, 32 hex digits
#[must_use]
pub fn new_record_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

pub(crate) fn sort_by_name(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        (a.last_name.to_lowercase(), a.first_name.to_lowercase(), &a.id)
            .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase(), &b.id))
    });
}
