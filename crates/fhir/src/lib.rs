//! FHIR wire/boundary support for the synced patient store.
//!
//! This crate provides **wire models** and **format/translation helpers** for the
//! on-disk patient files read by `synced-core`:
//! - YAML patient resources (identifier, names, metadata)
//!
//! This crate focuses on:
//! - FHIR semantic alignment (without FHIR JSON/REST transport)
//! - serialisation/deserialisation
//! - translation between domain primitives and wire structs

pub mod patient;

// Re-export facades
pub use patient::Patient;

// Re-export public domain-level types
pub use patient::{HumanName, NameUse, PatientData};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
