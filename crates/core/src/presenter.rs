//! Synced patients presenter.
//!
//! [`PatientSearchFilter`] sits between a [`PatientSource`] (where patients come from) and a
//! [`PatientView`] (where they are shown). It holds one piece of state, the current search
//! query, and on every [`refresh`](PatientSearchFilter::refresh) it:
//!
//! 1. fetches the full patient collection,
//! 2. narrows it with [`filter_by_query`] when a query is set,
//! 3. tells the view whether to show the list or an empty-state message,
//! 4. hands the view the list to render.
//!
//! An empty query string still counts as an active query.

use crate::error::PatientResult;
use crate::patient::PatientRecord;
use crate::search::filter_by_query;

// ============================================================================
// COLLABORATORS
// ============================================================================

/// Data-access capability: returns every known patient.
///
/// Implementations are total. An empty store yields an empty vector rather than an error.
pub trait PatientSource {
    fn all_patients(&self) -> Vec<PatientRecord>;
}

impl PatientSource for Vec<PatientRecord> {
    fn all_patients(&self) -> Vec<PatientRecord> {
        self.clone()
    }
}

/// Display capability driven by the presenter.
pub trait PatientView {
    /// Show the list, or an empty-state message selected by `visibility`.
    fn update_list_visibility(&mut self, visibility: &ListVisibility);

    /// Render `patients`. `is_filtering` is true when a query was active.
    fn update_adapter(&mut self, patients: &[PatientRecord], is_filtering: bool);
}

// ============================================================================
// VISIBILITY SIGNAL
// ============================================================================

/// Opaque message ids the view resolves into display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyStateLabel {
    /// A query was active and nothing matched.
    NoResultsForQuery,
    /// No query was active and there are no patients.
    NoResults,
    /// The list has content; no message.
    None,
}

impl EmptyStateLabel {
    pub fn message_key(self) -> &'static str {
        match self {
            EmptyStateLabel::NoResultsForQuery => "search_patient_no_result_for_query",
            EmptyStateLabel::NoResults => "search_patient_no_results",
            EmptyStateLabel::None => "last_vitals_none_label",
        }
    }
}

/// Whether the list has content, and which empty state to show when it does not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListVisibility {
    HasResults,
    NoResults,
    NoResultsForQuery(String),
}

impl ListVisibility {
    pub fn has_content(&self) -> bool {
        matches!(self, ListVisibility::HasResults)
    }

    pub fn label(&self) -> EmptyStateLabel {
        match self {
            ListVisibility::HasResults => EmptyStateLabel::None,
            ListVisibility::NoResults => EmptyStateLabel::NoResults,
            ListVisibility::NoResultsForQuery(_) => EmptyStateLabel::NoResultsForQuery,
        }
    }

    /// The query that produced no results, if any.
    pub fn query_text(&self) -> Option<&str> {
        match self {
            ListVisibility::NoResultsForQuery(query) => Some(query),
            _ => None,
        }
    }
}

// ============================================================================
// PRESENTER
// ============================================================================

/// Search/filter presenter over a patient source and a view.
///
/// Collaborators are injected at construction and owned by the presenter; use
/// [`view`](Self::view) / [`into_parts`](Self::into_parts) to get them back.
#[derive(Debug)]
pub struct PatientSearchFilter<S, V> {
    source: S,
    view: V,
    query: Option<String>,
}

impl<S: PatientSource, V: PatientView> PatientSearchFilter<S, V> {
    pub fn new(source: S, view: V) -> Self {
        Self {
            source,
            view,
            query: None,
        }
    }

    /// Populates the view on activation. Each call recomputes everything.
    pub fn start(&mut self) -> PatientResult<()> {
        self.refresh()
    }

    /// Replaces the active query. `None` turns filtering off; `Some("")` does not.
    pub fn set_query(&mut self, query: Option<String>) {
        self.query = query;
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Recomputes the visible list and pushes it to the view.
    ///
    /// The view receives exactly two calls, visibility first and then the list.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::MissingName`](crate::PatientError::MissingName) when a query
    /// is active and some patient has no name record. The view is not touched in that case.
    pub fn refresh(&mut self) -> PatientResult<()> {
        let all_patients = self.source.all_patients();
        let total = all_patients.len();

        let (patients, visibility) = match self.query.as_deref() {
            Some(query) => {
                let filtered = filter_by_query(&all_patients, query)?;
                let visibility = if filtered.is_empty() {
                    ListVisibility::NoResultsForQuery(query.to_string())
                } else {
                    ListVisibility::HasResults
                };
                (filtered, visibility)
            }
            None => {
                let visibility = if all_patients.is_empty() {
                    ListVisibility::NoResults
                } else {
                    ListVisibility::HasResults
                };
                (all_patients, visibility)
            }
        };
        let is_filtering = self.query.is_some();

        tracing::debug!(
            total,
            shown = patients.len(),
            is_filtering,
            "refreshed patient list"
        );

        self.view.update_list_visibility(&visibility);
        self.view.update_adapter(&patients, is_filtering);

        Ok(())
    }
}

impl<S, V> PatientSearchFilter<S, V> {
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (S, V) {
        (self.source, self.view)
    }
}
