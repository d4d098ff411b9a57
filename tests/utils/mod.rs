#![allow(dead_code)]

use chrono::NaiveDate;
use maternal_registry::Patient;
use maternal_registry::algorithm::validation::RecordValidator;
use maternal_registry::models::PrenatalVisit;

/// Date in 2024
#[must_use]
pub fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// A record that passes the required-field checks
#[must_use]
pub fn registered_patient(first: &str, last: &str, age: u32) -> Patient {
    let mut patient = Patient::new(first, last);
    patient.age = Some(age);
    patient.barangay = Some("Alangilan".to_string());
    patient.address = Some("Purok 1".to_string());
    patient.date_of_registration = Some(d(1, 2));
    patient.lmp = Some(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap());
    patient.gravida = Some(1);
    patient.parity = Some(0);
    patient
}

/// Add weekly prenatal visits starting on January 3rd through the validator
pub fn with_visits(mut patient: Patient, count: u32) -> Patient {
    let mut validator = RecordValidator::new(&mut patient);
    for week in 0..count {
        let date = d(1, 3) + chrono::Days::new(u64::from(week) * 7);
        validator
            .add_prenatal_visit(PrenatalVisit::new(date, Some(55.0), Some(155.0)))
            .unwrap();
    }
    patient
}

/// A small mixed cohort covering every reporting band
#[must_use]
pub fn cohort() -> Vec<Patient> {
    let mut patients = Vec::new();
    for (i, age) in [12, 13, 16, 18, 22, 30, 41, 52].into_iter().enumerate() {
        let mut patient = with_visits(registered_patient("Maria", &format!("Test{i}"), age), (i % 6) as u32);
        patient.id = Some(format!("p{i}"));
        patient.is_deworming_given = i % 2 == 0;
        patients.push(patient);
    }
    patients
}
