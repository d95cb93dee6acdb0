//! Constants used throughout the synced core crate.
//!
//! This module contains path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for patient data storage when no explicit directory is configured.
pub const DEFAULT_PATIENT_DATA_DIR: &str = "/patient_data";

/// Directory name for demographics records storage.
pub const DEMOGRAPHICS_DIR_NAME: &str = "demographics";

/// Filename for patient YAML files.
pub const PATIENT_FILE_NAME: &str = "patient.yaml";
