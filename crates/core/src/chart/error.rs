//! Chart of accounts error types.

use thiserror::Error;

use ecf_shared::AppError;
use ecf_shared::types::{AccountId, ReferenceAccountId};

use crate::ports::StoreError;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Input failed a field rule.
    #[error("Invalid account: {0}")]
    Invalid(String),

    /// Account code already exists for the company and fiscal year.
    #[error("Account code '{code}' already exists for fiscal year {fiscal_year}")]
    DuplicateCode {
        /// The duplicated code.
        code: String,
        /// The fiscal year it collides in.
        fiscal_year: i32,
    },

    /// The regulatory reference account does not exist.
    #[error("Reference account not found: {0}")]
    ReferenceAccountNotFound(ReferenceAccountId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "INVALID_ACCOUNT",
            Self::DuplicateCode { .. } => "DUPLICATE_ACCOUNT_CODE",
            Self::ReferenceAccountNotFound(_) => "REFERENCE_ACCOUNT_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Invalid(_) | ChartError::ReferenceAccountNotFound(_) => {
                Self::Validation(err.to_string())
            }
            ChartError::DuplicateCode { .. } => Self::Conflict(err.to_string()),
            ChartError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ChartError::Store(_) => Self::Database(err.to_string()),
        }
    }
}
