//! Application-wide error types.
//!
//! Domain errors from `ecf-core` convert into [`AppError`] at the boundary
//! where a caller needs a single taxonomy (CLI, adapters, binaries).

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The competence date falls before the company's locked accounting period.
    #[error("Accounting period locked: {0}")]
    PeriodLocked(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-equivalent status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::PeriodLocked(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PeriodLocked(_) => "PERIOD_LOCKED",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller can fix the request and try again.
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
