//! Patient records as seen by search and listing.
//!
//! A [`PatientRecord`] is the in-memory shape handed between the data-access layer, the
//! search filter and the view. It is deliberately smaller than the FHIR wire model: one
//! optional business identifier plus an ordered list of names.

use crate::error::{PatientError, PatientResult};
use fhir::PatientData;
use uuid::Uuid;

/// A single name record with given and family parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

impl PersonName {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }
}

/// A patient with its identifier and name records, primary name first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRecord {
    /// Storage id of the patient resource.
    pub id: Uuid,
    /// Business identifier, if one has been assigned.
    pub identifier: Option<String>,
    /// Name records in their stored order.
    pub names: Vec<PersonName>,
}

impl PatientRecord {
    pub fn new(id: Uuid, identifier: Option<String>, names: Vec<PersonName>) -> Self {
        Self {
            id,
            identifier,
            names,
        }
    }

    /// Returns the first name record.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::MissingName`] if the patient has no name records.
    pub fn primary_name(&self) -> PatientResult<&PersonName> {
        self.names
            .first()
            .ok_or(PatientError::MissingName { id: self.id })
    }
}

impl From<PatientData> for PatientRecord {
    /// Flattens FHIR names: multiple given names are joined with a single space and a
    /// missing family name becomes an empty string.
    fn from(data: PatientData) -> Self {
        let names = data
            .names
            .into_iter()
            .map(|n| PersonName {
                given: n.given.join(" "),
                family: n.family.unwrap_or_default(),
            })
            .collect();

        Self {
            id: data.id,
            identifier: data.identifier,
            names,
        }
    }
}
