//! Journal entry error types.
//!
//! Every variant except [`JournalError::IllegalState`] and
//! [`JournalError::Store`] is correctable by the caller. A store conflict
//! means the entry changed under the operation and the caller may retry it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use ecf_shared::AppError;
use ecf_shared::types::AccountId;

use crate::period::PeriodError;
use crate::ports::StoreError;

/// Structural or referential problem with an entry, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Debit and credit name the same account.
    #[error("Debit and credit accounts must differ (both are {0})")]
    SameAccount(AccountId),

    /// Amount is zero, negative, or does not fit the stored precision.
    #[error(
        "Entry amount must be positive, below 10^15 and have at most 4 decimal places, got {0}"
    )]
    InvalidAmount(Decimal),

    /// Referenced account does not exist for the company.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced account is deactivated.
    #[error("Account {0} is inactive")]
    InactiveAccount(AccountId),

    /// Referenced account belongs to another fiscal year.
    #[error(
        "Account {account_id} belongs to fiscal year {account_fiscal_year}, entry is for {entry_fiscal_year}"
    )]
    FiscalYearMismatch {
        /// The mismatching account.
        account_id: AccountId,
        /// The account's fiscal year.
        account_fiscal_year: i32,
        /// The entry's fiscal year.
        entry_fiscal_year: i32,
    },
}

impl ValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SameAccount(_) => "SAME_ACCOUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InactiveAccount(_) => "INACTIVE_ACCOUNT",
            Self::FiscalYearMismatch { .. } => "FISCAL_YEAR_MISMATCH",
        }
    }
}

/// Kind of entity a [`JournalError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A journal entry.
    JournalEntry,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::JournalEntry => "Journal entry",
        })
    }
}

/// Errors that can occur during journal entry operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The competence date is before the company's locked accounting period.
    #[error(
        "Competence date {competence_date} is before the locked accounting period {accounting_period}"
    )]
    PeriodLockViolation {
        /// The rejected competence date.
        competence_date: NaiveDate,
        /// The company's período contábil.
        accounting_period: NaiveDate,
    },

    /// The entry failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The target resource does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up.
        kind: EntityKind,
        /// The id looked up.
        id: Uuid,
    },

    /// Data is inconsistent in a way no request can fix.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JournalError {
    /// Shorthand for a missing journal entry.
    #[must_use]
    pub fn entry_not_found(id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            kind: EntityKind::JournalEntry,
            id: id.into(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodLockViolation { .. } => "PERIOD_LOCKED",
            Self::Validation(inner) => inner.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::IllegalState(_) => "ILLEGAL_STATE",
            Self::Store(StoreError::Conflict(_)) => "CONFLICT",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::PeriodLockViolation { .. } => 422,
            Self::Store(StoreError::Conflict(_)) => 409,
            Self::IllegalState(_) | Self::Store(_) => 500,
        }
    }

    /// Returns true if the caller can fix the request, or retry it after a
    /// concurrent change.
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        match self {
            Self::Store(StoreError::Conflict(_)) => true,
            Self::IllegalState(_) | Self::Store(_) => false,
            _ => true,
        }
    }
}

impl From<PeriodError> for JournalError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::Locked(violation) => Self::PeriodLockViolation {
                competence_date: violation.competence_date,
                accounting_period: violation.accounting_period,
            },
            PeriodError::CompanyNotFound(id) => {
                Self::IllegalState(format!("company {id} referenced by request context has no record"))
            }
            PeriodError::Store(e) => Self::Store(e),
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::PeriodLockViolation { .. } => Self::PeriodLocked(err.to_string()),
            JournalError::Validation(inner) => Self::Validation(inner.to_string()),
            JournalError::NotFound { .. } => Self::NotFound(err.to_string()),
            JournalError::IllegalState(_) => Self::Internal(err.to_string()),
            JournalError::Store(StoreError::Conflict(_)) => Self::Conflict(err.to_string()),
            JournalError::Store(_) => Self::Database(err.to_string()),
        }
    }
}
