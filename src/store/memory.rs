//! In-memory repository

use rustc_hash::FxHashMap;

use super::{PatientRepository, new_record_id, sort_by_name};
use crate::error::{RegistryError, Result};
use crate::models::Patient;

/// Repository holding records in a hash map
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: FxHashMap<String, Patient>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PatientRepository for InMemoryRepository {
    fn create(&mut self, mut patient: Patient) -> Result<String> {
        let id = patient.id.clone().unwrap_or_else(new_record_id);
        if self.records.contains_key(&id) {
            return Err(RegistryError::DuplicateRecord(id));
        }
        patient.id = Some(id.clone());
        self.records.insert(id.clone(), patient);
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Patient> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::RecordNotFound(id.to_string()))
    }

    fn update(&mut self, id: &str, mut patient: Patient) -> Result<()> {
        let slot = self
            .records
            .get_mut(id)
            .ok_or_else(|| RegistryError::RecordNotFound(id.to_string()))?;
        patient.id = Some(id.to_string());
        *slot = patient;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RegistryError::RecordNotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<Patient>> {
        let mut patients: Vec<_> = self.records.values().cloned().collect();
        sort_by_name(&mut patients);
        Ok(patients)
    }
}
