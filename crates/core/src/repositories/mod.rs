//! Repository management modules.
//!
//! This module contains services backed by the on-disk patient store.

pub mod patients;
