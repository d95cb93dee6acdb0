#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient has no name record (id: {id})")]
    MissingName { id: uuid::Uuid },
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create patient directory: {0}")]
    PatientDirCreation(std::io::Error),
    #[error("failed to write patient file: {0}")]
    FileWrite(std::io::Error),
    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
