//! JSON file storage
//!
//! One pretty-printed JSON document per record, named `<id>.json`. Files
//! that fail to parse are skipped with a warning when listing so that one
//! damaged record does not hide the rest.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use super::{PatientRepository, new_record_id, sort_by_name};
use crate::error::util::{ensure_directory, safe_read_to_string, safe_write, validate_directory};
use crate::error::{RegistryError, Result};
use crate::models::Patient;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Repository storing each record as a JSON file in a directory
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    dir: PathBuf,
}

impl JsonDirRepository {
    /// Open a directory, creating it if missing
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_directory(&dir, "record store")?;
        Ok(Self { dir })
    }

    /// Open a directory that must already exist and be readable
    pub fn open_existing(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        validate_directory(&dir, "record store")?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RegistryError::malformed(id, "record identifiers may only contain letters, digits, '-' and '_'"));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn write(&self, path: &Path, patient: &Patient) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(patient)?;
        safe_write(path, &bytes, "patient record")
    }
}

fn read_record(path: &Path) -> Result<Patient> {
    let text = safe_read_to_string(path, "patient record")?;
    Ok(serde_json::from_str(&text)?)
}

impl PatientRepository for JsonDirRepository {
    fn create(&mut self, mut patient: Patient) -> Result<String> {
        let id = patient.id.clone().unwrap_or_else(new_record_id);
        let path = self.path_for(&id)?;
        if path.exists() {
            return Err(RegistryError::DuplicateRecord(id));
        }
        patient.id = Some(id.clone());
        self.write(&path, &patient)?;
        log::debug!("Created record {id}");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Patient> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(RegistryError::RecordNotFound(id.to_string()));
        }
        read_record(&path)
    }

    fn update(&mut self, id: &str, mut patient: Patient) -> Result<()> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(RegistryError::RecordNotFound(id.to_string()));
        }
        patient.id = Some(id.to_string());
        self.write(&path, &patient)?;
        log::debug!("Updated record {id}");
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(RegistryError::RecordNotFound(id.to_string()));
        }
        std::fs::remove_file(&path)
            .map_err(|e| RegistryError::path_error_with_source(&path, "Failed to delete record", e))?;
        log::debug!("Deleted record {id}");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Patient>> {
        let start = Instant::now();
        log_operation_start("Loading records from", &self.dir);

        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| RegistryError::path_error_with_source(&self.dir, "Failed to read record store", e))?;
        let paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    log_warning(&format!("Skipping unreadable directory entry: {e}"), Some(&self.dir));
                    None
                }
            })
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();

        let mut patients: Vec<Patient> = paths
            .par_iter()
            .filter_map(|path| match read_record(path) {
                Ok(patient) => Some(patient),
                Err(e) => {
                    log_warning(&format!("Skipping unparseable record ({e})"), Some(path));
                    None
                }
            })
            .collect();
        sort_by_name(&mut patients);

        log_operation_complete("loaded", &self.dir, patients.len(), Some(start.elapsed()));
        Ok(patients)
    }
}

/// Read a JSON array of patient records from a file
///
/// Entries that are not valid records are skipped with a warning.
pub fn read_patient_array(path: &Path) -> Result<Vec<Patient>> {
    let start = Instant::now();
    log_operation_start("Reading patient records from", path);

    let text = safe_read_to_string(path, "patient list")?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;
    let patients: Vec<Patient> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(patient) => Some(patient),
            Err(e) => {
                log_warning(&format!("Skipping entry {i}: {e}"), Some(path));
                None
            }
        })
        .collect();

    log_operation_complete("read", path, patients.len(), Some(start.elapsed()));
    Ok(patients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonDirRepository::open(dir.path().join("records")).unwrap();

        let mut p = Patient::new("Ana", "Reyes");
        p.age = Some(24);
        let id = repo.create(p).unwrap();
        let loaded = repo.get(&id).unwrap();
        assert_eq!(loaded.age, Some(24));
        assert_eq!(loaded.id.as_deref(), Some(id.as_str()));

        std::fs::write(repo.dir().join("broken.json"), "{not json").unwrap();
        std::fs::write(repo.dir().join("notes.txt"), "ignored").unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);

        repo.delete(&id).unwrap();
        assert!(matches!(repo.get(&id), Err(RegistryError::RecordNotFound(_))));
    }

    #[test]
    fn test_open_existing_does_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            JsonDirRepository::open_existing(&missing),
            Err(RegistryError::PathError { .. })
        ));
        assert!(!missing.exists());

        let file = dir.path().join("patients.json");
        std::fs::write(&file, "[]").unwrap();
        assert!(JsonDirRepository::open_existing(&file).is_err());

        std::fs::create_dir(&missing).unwrap();
        let repo = JsonDirRepository::open_existing(&missing).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::open(dir.path()).unwrap();
        assert!(matches!(repo.get("../etc"), Err(RegistryError::MalformedRecord { .. })));
    }

    #[test]
    fn test_patient_array_skips_bad_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(&path, r#"[{"first_name": "Ana", "age": "20"}, 5, {"last_name": "Cruz"}]"#).unwrap();
        let patients = read_patient_array(&path).unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].age, Some(20));
    }
}
