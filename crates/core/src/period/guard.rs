//! Pure period guard.

use chrono::NaiveDate;

use super::error::PeriodLockViolation;

/// Returns true if `competence` may be mutated under `accounting_period`.
///
/// The boundary is inclusive. A company without a configured period has no
/// constraint, so `None` always permits.
#[must_use]
pub fn is_permitted(competence: NaiveDate, accounting_period: Option<NaiveDate>) -> bool {
    accounting_period.is_none_or(|period| competence >= period)
}

/// Like [`is_permitted`], returning the violation with both dates on failure.
pub fn check(
    competence: NaiveDate,
    accounting_period: Option<NaiveDate>,
) -> Result<(), PeriodLockViolation> {
    match accounting_period {
        Some(period) if competence < period => Err(PeriodLockViolation {
            competence_date: competence,
            accounting_period: period,
        }),
        _ => Ok(()),
    }
}
