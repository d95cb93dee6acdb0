//! Prefix search over patient records.
//!
//! A patient matches a query when the query is a case-insensitive prefix of the primary
//! given name, the primary family name, or the identifier. This is a prefix match only:
//! `"nna"` does not match `"Anna"`.

use crate::error::PatientResult;
use crate::patient::PatientRecord;

/// Filters `patients` down to those matching `query`, keeping their relative order.
///
/// The source slice is left untouched; matches are cloned into a new vector. An empty
/// query matches every patient that has a name record.
///
/// # Errors
///
/// Returns [`PatientError::MissingName`](crate::PatientError::MissingName) if any patient
/// has no name record.
pub fn filter_by_query(
    patients: &[PatientRecord],
    query: &str,
) -> PatientResult<Vec<PatientRecord>> {
    let query = query.to_lowercase();
    let mut filtered = Vec::new();

    for patient in patients {
        if matches_query(patient, &query)? {
            filtered.push(patient.clone());
        }
    }

    Ok(filtered)
}

/// Tests a single patient against an already-lowercased query.
pub fn matches_query(patient: &PatientRecord, query_lower: &str) -> PatientResult<bool> {
    let name = patient.primary_name()?;

    let given_fits = name.given.to_lowercase().starts_with(query_lower);
    let family_fits = name.family.to_lowercase().starts_with(query_lower);
    let identifier_fits = patient
        .identifier
        .as_deref()
        .is_some_and(|identifier| leading_chars_equal(identifier, query_lower));

    Ok(given_fits || family_fits || identifier_fits)
}

// Identifiers are compared by cutting the query's length off the raw value first and
// lowercasing only that slice.
fn leading_chars_equal(value: &str, query_lower: &str) -> bool {
    let len = query_lower.chars().count();
    if value.chars().count() < len {
        return false;
    }
    let leading: String = value.chars().take(len).collect();
    leading.to_lowercase() == query_lower
}
