//! JSON flat-file persistence.
//!
//! The engine itself never performs I/O; this module is the collaborator
//! that loads and saves the settings and the per-month day entries it
//! works on. See [`JsonStore`] for the file layout.

mod json_store;

pub use json_store::{JsonStore, SavedSettings, StoredMonth, StoredSettings};
