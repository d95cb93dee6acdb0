//! # Synced Core
//!
//! Core logic for browsing and searching locally synced patient records.
//!
//! This crate contains:
//! - [`PatientRecord`], the in-memory patient shape used by search and listing
//! - [`search::filter_by_query`], the case-insensitive prefix filter
//! - [`PatientSearchFilter`], the presenter that drives a [`PatientView`] from a
//!   [`PatientSource`] and the current query
//! - [`PatientRepository`], the file-backed [`PatientSource`]
//!
//! **No UI concerns**: rendering and message text belong to the binaries that implement
//! [`PatientView`].

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod presenter;
pub mod repositories;
pub mod search;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use patient::{PatientRecord, PersonName};
pub use presenter::{
    EmptyStateLabel, ListVisibility, PatientSearchFilter, PatientSource, PatientView,
};
pub use repositories::patients::PatientRepository;
pub use uuid::Uuid;
