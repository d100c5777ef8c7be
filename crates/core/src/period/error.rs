//! Period enforcement errors.

use chrono::NaiveDate;
use thiserror::Error;

use ecf_shared::types::CompanyId;

use crate::ports::StoreError;

/// A competence date falls before the company's locked accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Competence date {competence_date} is before the locked accounting period {accounting_period}")]
pub struct PeriodLockViolation {
    /// The rejected competence date.
    pub competence_date: NaiveDate,
    /// The company's período contábil at the time of the check.
    pub accounting_period: NaiveDate,
}

/// Errors raised while admitting a guarded operation.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// The operation touches a locked period.
    #[error(transparent)]
    Locked(#[from] PeriodLockViolation),

    /// The context names a company that has no record.
    #[error("Company {0} referenced by the request context does not exist")]
    CompanyNotFound(CompanyId),

    /// Reading the company failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
