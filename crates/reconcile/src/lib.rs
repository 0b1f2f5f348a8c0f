//! Reconciliation of archive captures against their index.
//!
//! [`EntryStore`] holds what the readers produced, [`reconcile`] finds the
//! archive captures the index doesn't know about, and [`ReportWriter`]
//! persists all of it as plain text for review.

mod diff;
pub mod error;
mod report;
mod store;

pub use crate::diff::{Difference, reconcile};
pub use crate::report::{ReportPaths, ReportWriter, RunStamp, files_to_save};
pub use crate::store::EntryStore;
