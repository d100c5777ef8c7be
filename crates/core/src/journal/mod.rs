//! Double-entry journal entries (lançamentos contábeis).
//!
//! This module implements:
//! - Journal entry domain types and list filters
//! - The structural validator run before any write
//! - The lifecycle service owning the entry write path
//! - Error types for journal operations

pub mod error;
pub mod service;
pub mod types;
pub mod validator;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validator_props;

pub use error::{EntityKind, JournalError, ValidationError};
pub use service::JournalEntryService;
pub use types::{EntryFilter, JournalEntry, JournalEntryInput};
pub use validator::{AMOUNT_PRECISION, AMOUNT_SCALE, fits_amount_column, validate};
