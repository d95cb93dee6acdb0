//! File-backed patient store.
//!
//! Patients are stored as FHIR-aligned YAML files in a sharded structure:
//!
//! ```text
//! demographics/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         patient.yaml
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the UUID.
//!
//! [`PatientRepository`] is the [`PatientSource`] used outside of tests: listing never fails,
//! and files that cannot be read or parsed are logged and skipped.

use crate::config::CoreConfig;
use crate::constants::PATIENT_FILE_NAME;
use crate::error::{PatientError, PatientResult};
use crate::patient::PatientRecord;
use crate::presenter::PatientSource;
use chrono::Utc;
use fhir::{HumanName, NameUse, Patient, PatientData};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Returns `<parent>/<s1>/<s2>/<uuid>` for the canonical (simple) form of `id`.
fn sharded_dir(parent_dir: &Path, id: &Uuid) -> PathBuf {
    let canonical = id.simple().to_string();
    let s1 = &canonical[0..2];
    let s2 = &canonical[2..4];
    parent_dir.join(s1).join(s2).join(&canonical)
}

/// Reads and writes patient records under the configured demographics directory.
#[derive(Clone, Debug)]
pub struct PatientRepository {
    cfg: Arc<CoreConfig>,
}

impl PatientRepository {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Creates a new patient record and returns its id.
    ///
    /// The record gets a single official name and, when supplied, one identifier.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - `given` or `family` is blank,
    /// - the demographics or patient directory cannot be created,
    /// - rendering or writing `patient.yaml` fails.
    pub fn create_patient(
        &self,
        identifier: Option<String>,
        given: &str,
        family: &str,
    ) -> PatientResult<Uuid> {
        let given = given.trim();
        let family = family.trim();
        if given.is_empty() || family.is_empty() {
            return Err(PatientError::InvalidInput(
                "given and family names are required".into(),
            ));
        }
        let identifier = identifier
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        let demographics_dir = self.cfg.demographics_dir();
        fs::create_dir_all(&demographics_dir).map_err(PatientError::StorageDirCreation)?;

        let id = Uuid::new_v4();
        let patient_data = PatientData {
            id,
            identifier,
            names: vec![HumanName {
                use_type: Some(NameUse::Official),
                family: Some(family.to_string()),
                given: given.split_whitespace().map(str::to_string).collect(),
            }],
            last_updated: Some(Utc::now()),
        };
        let yaml = Patient::render(&patient_data)?;

        let patient_dir = sharded_dir(&demographics_dir, &id);
        fs::create_dir_all(&patient_dir).map_err(PatientError::PatientDirCreation)?;
        fs::write(patient_dir.join(PATIENT_FILE_NAME), yaml).map_err(PatientError::FileWrite)?;

        tracing::info!(patient_id = %id.simple(), "created patient record");

        Ok(id)
    }

    /// Lists all patient records from the file system.
    ///
    /// Records are ordered by primary family name, then primary given name, then id, so
    /// the listing does not depend on directory iteration order.
    pub fn list_patients(&self) -> Vec<PatientRecord> {
        let demographics_dir = self.cfg.demographics_dir();
        let mut patients = Vec::new();

        let s1_iter = match fs::read_dir(&demographics_dir) {
            Ok(it) => it,
            Err(_) => return patients,
        };
        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };

                for id_ent in id_iter.flatten() {
                    let patient_path = id_ent.path().join(PATIENT_FILE_NAME);
                    if !patient_path.is_file() {
                        continue;
                    }

                    let contents = match fs::read_to_string(&patient_path) {
                        Ok(contents) => contents,
                        Err(e) => {
                            tracing::warn!(
                                "failed to read {}: {}",
                                patient_path.display(),
                                e
                            );
                            continue;
                        }
                    };

                    match Patient::parse(&contents) {
                        Ok(patient_data) => patients.push(PatientRecord::from(patient_data)),
                        Err(e) => {
                            tracing::warn!(
                                "failed to parse patient.yaml: {} - {}",
                                patient_path.display(),
                                e
                            );
                        }
                    }
                }
            }
        }

        patients.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        patients
    }
}

fn sort_key(patient: &PatientRecord) -> (&str, &str, Uuid) {
    match patient.names.first() {
        Some(name) => (name.family.as_str(), name.given.as_str(), patient.id),
        None => ("", "", patient.id),
    }
}

impl PatientSource for PatientRepository {
    fn all_patients(&self) -> Vec<PatientRecord> {
        self.list_patients()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEMOGRAPHICS_DIR_NAME;
    use crate::patient::PersonName;
    use tempfile::TempDir;

    fn test_repo(patient_data_dir: &Path) -> PatientRepository {
        let cfg = CoreConfig::new(patient_data_dir.to_path_buf())
            .expect("CoreConfig::new should succeed");
        PatientRepository::new(Arc::new(cfg))
    }

    #[test]
    fn test_list_patients_returns_empty_for_nonexistent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(&temp_dir.path().join("missing"));
        assert!(repo.list_patients().is_empty());
    }

    #[test]
    fn test_create_patient_writes_sharded_yaml() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(temp_dir.path());

        let id = repo
            .create_patient(Some("1001A".into()), "Sarah Jane", "Williams")
            .expect("create patient");

        let canonical = id.simple().to_string();
        let patient_path = temp_dir
            .path()
            .join(DEMOGRAPHICS_DIR_NAME)
            .join(&canonical[0..2])
            .join(&canonical[2..4])
            .join(&canonical)
            .join(PATIENT_FILE_NAME);
        assert!(patient_path.is_file());

        let contents = fs::read_to_string(&patient_path).expect("read patient.yaml");
        let data = Patient::parse(&contents).expect("parse patient.yaml");
        assert_eq!(data.id, id);
        assert_eq!(data.identifier.as_deref(), Some("1001A"));
        assert_eq!(data.names[0].given, vec!["Sarah", "Jane"]);
        assert!(data.last_updated.is_some());
    }

    #[test]
    fn test_create_patient_rejects_blank_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(temp_dir.path());

        let err = repo
            .create_patient(None, "  ", "Williams")
            .expect_err("blank given name should fail");
        assert!(matches!(err, PatientError::InvalidInput(_)));
        assert!(!temp_dir.path().join(DEMOGRAPHICS_DIR_NAME).exists());
    }

    #[test]
    fn test_list_patients_returns_created_patients_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(temp_dir.path());

        repo.create_patient(None, "Tom", "Young").expect("create");
        let anna = repo
            .create_patient(Some("1001A".into()), "Anna", "Adams")
            .expect("create");
        repo.create_patient(Some("  ".into()), "Ben", "Adams")
            .expect("create");

        let patients = repo.list_patients();
        let names: Vec<&PersonName> = patients.iter().map(|p| &p.names[0]).collect();
        assert_eq!(
            names,
            vec![
                &PersonName::new("Anna", "Adams"),
                &PersonName::new("Ben", "Adams"),
                &PersonName::new("Tom", "Young"),
            ]
        );
        assert_eq!(patients[0].id, anna);
        assert_eq!(patients[0].identifier.as_deref(), Some("1001A"));
        assert_eq!(patients[1].identifier, None);
    }

    #[test]
    fn test_list_patients_skips_invalid_yaml() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(temp_dir.path());

        repo.create_patient(None, "Anna", "Adams").expect("create");

        let bad_dir = sharded_dir(
            &temp_dir.path().join(DEMOGRAPHICS_DIR_NAME),
            &Uuid::new_v4(),
        );
        fs::create_dir_all(&bad_dir).expect("create bad dir");
        fs::write(bad_dir.join(PATIENT_FILE_NAME), "resourceType: [not valid")
            .expect("write bad yaml");

        let patients = repo.list_patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].names[0].given, "Anna");
    }

    #[test]
    fn test_repository_is_a_patient_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = test_repo(temp_dir.path());
        repo.create_patient(None, "Anna", "Adams").expect("create");

        assert_eq!(repo.all_patients(), repo.list_patients());
    }
}
