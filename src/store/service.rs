//! Validated record operations over a repository

use chrono::{SecondsFormat, Utc};

use super::PatientRepository;
use crate::algorithm::validation::{RecordValidator, ValidationError, finalize};
use crate::error::Result;
use crate::models::Patient;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Runs every write through finalisation
///
/// Edits are applied to a draft copy; a rejected edit leaves the stored
/// record untouched.
#[derive(Debug)]
pub struct RecordService<R: PatientRepository> {
    repository: R,
}

impl<R: PatientRepository> RecordService<R> {
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    pub const fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }

    /// Finalize and store a new record
    pub fn create(&mut self, mut patient: Patient) -> Result<String> {
        finalize(&mut patient)?;
        let now = timestamp();
        patient.created_at.get_or_insert_with(|| now.clone());
        patient.updated_at = Some(now);
        let id = self.repository.create(patient)?;
        log::debug!("Stored new record {id}");
        Ok(id)
    }

    /// Finalize and replace a stored record
    pub fn save(&mut self, id: &str, mut patient: Patient) -> Result<()> {
        let stored = self.repository.get(id)?;
        finalize(&mut patient)?;
        patient.created_at = stored.created_at.or(patient.created_at);
        patient.updated_at = Some(timestamp());
        self.repository.update(id, patient)
    }

    /// Apply validated edits to a stored record
    ///
    /// # Arguments
    /// * `id` - Record to edit
    /// * `edit` - Edits applied through a [`RecordValidator`] on a draft copy
    ///
    /// # Returns
    /// The finalized record as stored
    pub fn edit<F>(&mut self, id: &str, edit: F) -> Result<Patient>
    where
        F: FnOnce(&mut RecordValidator<'_>) -> std::result::Result<(), ValidationError>,
    {
        let mut draft = self.repository.get(id)?;
        {
            let mut validator = RecordValidator::new(&mut draft);
            edit(&mut validator)?;
        }
        finalize(&mut draft)?;
        draft.updated_at = Some(timestamp());
        self.repository.update(id, draft.clone())?;
        Ok(draft)
    }

    pub fn get(&self, id: &str) -> Result<Patient> {
        self.repository.get(id)
    }

    /// Administrative delete of a whole record
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.repository.delete(id)?;
        log::info!("Deleted record {id}");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Patient>> {
        self.repository.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::models::PrenatalVisit;
    use crate::store::InMemoryRepository;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn complete() -> Patient {
        let mut p = Patient::new("Ana", "Reyes");
        p.age = Some(24);
        p.barangay = Some("Alangilan".to_string());
        p.address = Some("Purok 2".to_string());
        p.lmp = Some(d(1, 1));
        p.gravida = Some(1);
        p.parity = Some(0);
        p
    }

    #[test]
    fn test_create_finalizes_and_stamps() {
        let mut service = RecordService::new(InMemoryRepository::new());
        let id = service.create(complete()).unwrap();
        let stored = service.get(&id).unwrap();
        assert_eq!(stored.edc, Some(d(10, 7)));
        assert!(stored.created_at.is_some());
        assert!(stored.updated_at.is_some());

        assert!(matches!(
            service.create(Patient::new("Ana", "")),
            Err(RegistryError::ValidationErrors(_))
        ));
    }

    #[test]
    fn test_rejected_edit_leaves_record_untouched() {
        let mut service = RecordService::new(InMemoryRepository::new());
        let id = service.create(complete()).unwrap();

        let edited = service
            .edit(&id, |v| v.add_prenatal_visit(PrenatalVisit::new(d(2, 10), Some(55.0), Some(158.0))))
            .unwrap();
        assert_eq!(edited.prenatal_visits.len(), 1);
        assert_eq!(edited.weight, Some(55.0));

        let result = service.edit(&id, |v| {
            v.add_prenatal_visit(PrenatalVisit::new(d(3, 1), Some(56.0), None))?;
            v.add_prenatal_visit(PrenatalVisit::new(d(2, 1), Some(56.0), None))
        });
        assert!(matches!(result, Err(RegistryError::Validation(_))));
        assert_eq!(service.get(&id).unwrap().prenatal_visits.len(), 1);
    }
}
