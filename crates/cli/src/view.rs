//! Terminal rendering of the patient list.

use synced_core::{EmptyStateLabel, ListVisibility, PatientRecord, PatientView};

/// Resolves an empty-state label into display text.
pub fn empty_state_message(label: EmptyStateLabel, query: Option<&str>) -> Option<String> {
    match label {
        EmptyStateLabel::NoResultsForQuery => Some(format!(
            "No patients found for \"{}\".",
            query.unwrap_or_default()
        )),
        EmptyStateLabel::NoResults => Some("No patients found.".to_string()),
        EmptyStateLabel::None => None,
    }
}

/// Collects output lines for the patient list; `main` prints them once the presenter is done.
#[derive(Debug, Default)]
pub struct TerminalView {
    message: Option<String>,
    rows: Vec<String>,
}

impl TerminalView {
    pub fn lines(&self) -> Vec<String> {
        match &self.message {
            Some(message) => vec![message.clone()],
            None => self.rows.clone(),
        }
    }
}

impl PatientView for TerminalView {
    fn update_list_visibility(&mut self, visibility: &ListVisibility) {
        self.message = empty_state_message(visibility.label(), visibility.query_text());
    }

    fn update_adapter(&mut self, patients: &[PatientRecord], is_filtering: bool) {
        self.rows = patients.iter().map(format_row).collect();
        if is_filtering && !patients.is_empty() {
            self.rows.push(format!("{} match(es)", patients.len()));
        }
    }
}

fn format_row(patient: &PatientRecord) -> String {
    let name = match patient.names.first() {
        Some(name) => format!("{} {}", name.given, name.family),
        None => "(no name)".to_string(),
    };
    format!(
        "ID: {}, Identifier: {}, Name: {}",
        patient.id.simple(),
        patient.identifier.as_deref().unwrap_or("-"),
        name.trim()
    )
}
