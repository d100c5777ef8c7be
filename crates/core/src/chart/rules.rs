//! Field rules for chart of accounts input.

use super::error::ChartError;
use super::types::{CreateAccountInput, UpdateAccountInput};

/// Earliest fiscal year accepted.
pub const MIN_FISCAL_YEAR: i32 = 2000;

/// Deepest hierarchy level accepted.
pub const MAX_LEVEL: u8 = 5;

/// Longest accepted account code.
pub const MAX_CODE_LEN: usize = 30;

/// Validates a create request.
pub fn validate_new_account(input: &CreateAccountInput) -> Result<(), ChartError> {
    let code = input.code.trim();
    if code.is_empty() {
        return Err(ChartError::Invalid("code must not be empty".to_string()));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(ChartError::Invalid(format!(
            "code must be at most {MAX_CODE_LEN} characters"
        )));
    }
    validate_name(&input.name)?;
    if input.fiscal_year < MIN_FISCAL_YEAR {
        return Err(ChartError::Invalid(format!(
            "fiscal year must be {MIN_FISCAL_YEAR} or later, got {}",
            input.fiscal_year
        )));
    }
    validate_level(input.level)
}

/// Validates the fields present in an update request.
pub fn validate_account_update(input: &UpdateAccountInput) -> Result<(), ChartError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(level) = input.level {
        validate_level(level)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ChartError> {
    if name.trim().is_empty() {
        return Err(ChartError::Invalid("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_level(level: u8) -> Result<(), ChartError> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(ChartError::Invalid(format!(
            "level must be between 1 and {MAX_LEVEL}, got {level}"
        )));
    }
    Ok(())
}
