//! FHIR-aligned patient wire models and translation helpers.
//!
//! This module provides both domain-level types and wire models for patient resources,
//! which carry patient identification and naming information.
//!
//! Responsibilities:
//! - Define public domain-level types for external API use
//! - Define a strict wire model for serialisation/deserialisation
//! - Provide translation helpers between domain primitives and the wire model
//! - Validate patient structure and enforce required fields
//!
//! Notes:
//! - Only the first `identifier` entry is carried into the domain type
//! - Name records keep their original order; the first one is the primary name

use crate::FhirError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Purpose of a human name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameUse {
    /// Official name.
    Official,
    /// Usual/preferred name.
    Usual,
    /// Temporary name.
    Temp,
    /// Nickname or informal name.
    Nickname,
    /// Anonymous name.
    Anonymous,
    /// Old name (no longer in use).
    Old,
    /// Maiden name.
    Maiden,
}

impl NameUse {
    /// Convert to FHIR wire format string.
    fn to_wire(self) -> &'static str {
        match self {
            NameUse::Official => "official",
            NameUse::Usual => "usual",
            NameUse::Temp => "temp",
            NameUse::Nickname => "nickname",
            NameUse::Anonymous => "anonymous",
            NameUse::Old => "old",
            NameUse::Maiden => "maiden",
        }
    }

    /// Parse from FHIR wire format string.
    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "official" => Some(NameUse::Official),
            "usual" => Some(NameUse::Usual),
            "temp" => Some(NameUse::Temp),
            "nickname" => Some(NameUse::Nickname),
            "anonymous" => Some(NameUse::Anonymous),
            "old" => Some(NameUse::Old),
            "maiden" => Some(NameUse::Maiden),
            _ => None,
        }
    }
}

/// A single human name record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HumanName {
    /// Purpose of the name (official, usual, nickname, etc.).
    pub use_type: Option<NameUse>,

    /// Family name (surname).
    pub family: Option<String>,

    /// Given names (first name, middle names).
    pub given: Vec<String>,
}

/// Domain-level carrier for patient data.
///
/// Unlike a flat demographics view, this keeps every name record in order so that
/// callers can decide which one is primary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientData {
    /// Unique identifier for this patient record.
    pub id: Uuid,

    /// Business identifier (for example a clinic number such as `1001A`).
    pub identifier: Option<String>,

    /// Name records, primary first.
    pub names: Vec<HumanName>,

    /// Last updated timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

// ============================================================================
// Public Patient operations
// ============================================================================

/// Patient resource operations.
///
/// This is a zero-sized type used for namespacing patient-related operations.
/// All methods are associated functions.
pub struct Patient;

impl Patient {
    /// Parse a patient resource from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `name.0.family`)
    /// to the failing field when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the YAML does not represent a valid patient resource,
    /// - any field has an unexpected type,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - resourceType is not "Patient",
    /// - the id is not a UUID.
    pub fn parse(yaml_text: &str) -> Result<PatientData, FhirError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, PatientWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "Patient schema mismatch at {path}: {source}"
                )));
            }
        };

        if wire.resource_type != "Patient" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Patient', got '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }

    /// Render a patient resource as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if serialisation fails.
    pub fn render(data: &PatientData) -> Result<String, FhirError> {
        let wire = domain_to_wire(data);
        serde_yaml::to_string(&wire)
            .map_err(|e| FhirError::Translation(format!("Failed to serialise patient: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a patient resource for on-disk YAML.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<IdentifierWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanNameWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PatientMetaWire>,
}

/// Wire representation of a business identifier.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct IdentifierWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub value: String,
}

/// Wire representation of a human name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct HumanNameWire {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
}

/// Wire representation of patient metadata.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PatientMetaWire {
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PatientWire) -> Result<PatientData, FhirError> {
    let id = Uuid::try_parse(&wire.id)
        .map_err(|e| FhirError::InvalidUuid(format!("{}: {e}", wire.id)))?;

    let identifier = wire.identifier.into_iter().next().map(|i| i.value);

    let names = wire
        .name
        .into_iter()
        .map(|n| HumanName {
            use_type: n.use_type.as_deref().and_then(NameUse::from_wire),
            family: n.family,
            given: n.given,
        })
        .collect();

    let last_updated = wire
        .meta
        .and_then(|m| m.last_updated)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());

    Ok(PatientData {
        id,
        identifier,
        names,
        last_updated,
    })
}

fn domain_to_wire(data: &PatientData) -> PatientWire {
    PatientWire {
        resource_type: "Patient".to_string(),
        id: data.id.simple().to_string(),
        identifier: data
            .identifier
            .iter()
            .map(|value| IdentifierWire {
                system: None,
                value: value.clone(),
            })
            .collect(),
        name: data
            .names
            .iter()
            .map(|n| HumanNameWire {
                use_type: n.use_type.map(|u| u.to_wire().to_string()),
                family: n.family.clone(),
                given: n.given.clone(),
            })
            .collect(),
        meta: data.last_updated.map(|dt| PatientMetaWire {
            last_updated: Some(dt.to_rfc3339()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_patient() {
        let input = r#"resourceType: Patient
id: 90a8d1ea318041d9adb070a834d4e0f6

identifier:
  - system: https://clinic.example/mrn
    value: 1001A

name:
  - use: official
    family: Williams
    given:
      - Sarah
      - Jane
  - use: nickname
    given:
      - Sally

meta:
  lastUpdated: 2026-01-23T13:58:04.099304Z
"#;

        let patient = Patient::parse(input).expect("parse yaml");
        assert_eq!(
            patient.id.simple().to_string(),
            "90a8d1ea318041d9adb070a834d4e0f6"
        );
        assert_eq!(patient.identifier.as_deref(), Some("1001A"));
        assert_eq!(patient.names.len(), 2);
        assert_eq!(patient.names[0].use_type, Some(NameUse::Official));
        assert_eq!(patient.names[0].family.as_deref(), Some("Williams"));
        assert_eq!(patient.names[0].given, vec!["Sarah", "Jane"]);
        assert_eq!(patient.names[1].use_type, Some(NameUse::Nickname));
        assert!(patient.names[1].family.is_none());
        assert!(patient.last_updated.is_some());
    }

    #[test]
    fn rendered_patient_parses_back() {
        let data = PatientData {
            id: Uuid::parse_str("90a8d1ea318041d9adb070a834d4e0f6").expect("valid uuid"),
            identifier: Some("1001A".to_string()),
            names: vec![HumanName {
                use_type: Some(NameUse::Official),
                family: Some("Williams".to_string()),
                given: vec!["Sarah".to_string()],
            }],
            last_updated: None,
        };

        let yaml = Patient::render(&data).expect("render patient");
        assert!(yaml.contains("resourceType: Patient"));
        assert!(yaml.contains("id: 90a8d1ea318041d9adb070a834d4e0f6"));
        assert!(yaml.contains("family: Williams"));
        assert!(!yaml.contains("meta:"));

        let reparsed = Patient::parse(&yaml).expect("reparse yaml");
        assert_eq!(reparsed, data);
    }

    #[test]
    fn numeric_looking_identifier_survives_render() {
        let data = PatientData {
            id: Uuid::new_v4(),
            identifier: Some("1001".to_string()),
            names: vec![],
            last_updated: None,
        };

        let yaml = Patient::render(&data).expect("render patient");
        let reparsed = Patient::parse(&yaml).expect("reparse yaml");
        assert_eq!(reparsed.identifier.as_deref(), Some("1001"));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"resourceType: Patient
id: 90a8d1ea318041d9adb070a834d4e0f6
name:
  - family: Williams
unexpected_key: should_fail
"#;

        let err = Patient::parse(input).expect_err("should reject unknown key");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("unexpected_key")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_reports_field_path() {
        let input = r#"resourceType: Patient
id: 90a8d1ea318041d9adb070a834d4e0f6
name:
  - family: Williams
    given: "not_an_array"
"#;

        let err = Patient::parse(input).expect_err("should reject wrong type");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("given")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let input = r#"resourceType: NotPatient
id: 90a8d1ea318041d9adb070a834d4e0f6
"#;

        let err = Patient::parse(input).expect_err("should reject invalid resourceType");
        match err {
            FhirError::InvalidInput(msg) => {
                assert!(msg.contains("Patient"));
                assert!(msg.contains("NotPatient"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_uuid_id() {
        let input = r#"resourceType: Patient
id: not-a-uuid
"#;

        let err = Patient::parse(input).expect_err("should reject bad id");
        assert!(matches!(err, FhirError::InvalidUuid(_)));
    }

    #[test]
    fn parses_minimal_patient_without_names() {
        let input = r#"resourceType: Patient
id: 90a8d1ea318041d9adb070a834d4e0f6
"#;

        let patient = Patient::parse(input).expect("should parse minimal patient");
        assert!(patient.identifier.is_none());
        assert!(patient.names.is_empty());
        assert!(patient.last_updated.is_none());
    }
}
