//! Journal entry validation.

use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::JournalEntryInput;
use crate::chart::ChartOfAccount;

/// Total significant digits of a stored amount.
pub const AMOUNT_PRECISION: u32 = 19;

/// Decimal places of a stored amount.
pub const AMOUNT_SCALE: u32 = 4;

/// Returns true if `amount` is stored exactly, without rounding or overflow.
#[must_use]
pub fn fits_amount_column(amount: Decimal) -> bool {
    let integer_limit = Decimal::from(10_i64.pow(AMOUNT_PRECISION - AMOUNT_SCALE));
    amount.normalize().scale() <= AMOUNT_SCALE && amount.abs() < integer_limit
}

/// Validates an entry against its resolved debit and credit accounts.
///
/// Checks run in this order and stop at the first failure:
/// 1. debit and credit accounts differ
/// 2. amount is positive and fits [`AMOUNT_PRECISION`] / [`AMOUNT_SCALE`]
/// 3. both accounts were resolved (debit first)
/// 4. both accounts are active
/// 5. both accounts belong to the entry's fiscal year
///
/// `None` means the account id did not resolve for the entry's company.
/// Pure: nothing is read or written.
pub fn validate(
    entry: &JournalEntryInput,
    debit: Option<&ChartOfAccount>,
    credit: Option<&ChartOfAccount>,
) -> Result<(), ValidationError> {
    if entry.debit_account_id == entry.credit_account_id {
        return Err(ValidationError::SameAccount(entry.debit_account_id));
    }

    if entry.amount <= Decimal::ZERO || !fits_amount_column(entry.amount) {
        return Err(ValidationError::InvalidAmount(entry.amount));
    }

    let debit = debit.ok_or(ValidationError::AccountNotFound(entry.debit_account_id))?;
    let credit = credit.ok_or(ValidationError::AccountNotFound(entry.credit_account_id))?;

    for account in [debit, credit] {
        if !account.is_active() {
            return Err(ValidationError::InactiveAccount(account.id));
        }
    }

    for account in [debit, credit] {
        if account.fiscal_year != entry.fiscal_year {
            return Err(ValidationError::FiscalYearMismatch {
                account_id: account.id,
                account_fiscal_year: account.fiscal_year,
                entry_fiscal_year: entry.fiscal_year,
            });
        }
    }

    Ok(())
}
