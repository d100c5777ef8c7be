//! Accounting-period integrity.
//!
//! A company's período contábil is the earliest competence date that may still
//! be mutated. This module holds:
//! - the pure guard deciding whether a competence date is permitted
//! - the enforcement step run before every guarded mutation
//! - the [`Temporal`] capability exposing an entity's competence date

pub mod enforcement;
pub mod error;
pub mod guard;

#[cfg(test)]
mod guard_props;

use chrono::NaiveDate;

pub use enforcement::{Admission, GuardedOperation, PeriodEnforcement};
pub use error::{PeriodError, PeriodLockViolation};
pub use guard::{check, is_permitted};

/// An entity anchored to a competence date.
pub trait Temporal {
    /// The competence date (data de competência) the entity belongs to.
    fn competence_date(&self) -> NaiveDate;
}
