//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Core code never reads process-wide environment variables itself;
//! binaries resolve them and hand the result over.

use crate::constants::{DEFAULT_PATIENT_DATA_DIR, DEMOGRAPHICS_DIR_NAME};
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] if `patient_data_dir` is empty.
    pub fn new(patient_data_dir: PathBuf) -> PatientResult<Self> {
        if patient_data_dir.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patient_data_dir cannot be empty".into(),
            ));
        }

        Ok(Self { patient_data_dir })
    }

    pub fn patient_data_dir(&self) -> &Path {
        &self.patient_data_dir
    }

    pub fn demographics_dir(&self) -> PathBuf {
        self.patient_data_dir.join(DEMOGRAPHICS_DIR_NAME)
    }
}

/// Resolve the patient data directory from an optional override value.
///
/// `None` or a blank value falls back to [`DEFAULT_PATIENT_DATA_DIR`].
pub fn patient_data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENT_DATA_DIR))
}
