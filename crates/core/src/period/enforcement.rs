//! Period enforcement before mutating operations.
//!
//! Every mutation of a temporally-scoped entity goes through
//! [`PeriodEnforcement::guarded`] (or calls [`PeriodEnforcement::admit`] as
//! its first step) with the competence dates it touches. The set of operations
//! that do so is [`GuardedOperation::ALL`]; read-only operations never appear
//! there.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use ecf_shared::types::CompanyId;

use super::error::PeriodError;
use super::guard;
use crate::context::RequestContext;
use crate::ports::CompanyLookup;

/// Mutating operations subject to period enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardedOperation {
    /// Creating a journal entry.
    CreateEntry,
    /// Updating a journal entry.
    UpdateEntry,
    /// Activating or deactivating a journal entry.
    ToggleEntryStatus,
}

impl GuardedOperation {
    /// All guarded operations.
    pub const ALL: [Self; 3] = [Self::CreateEntry, Self::UpdateEntry, Self::ToggleEntryStatus];

    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateEntry => "create_entry",
            Self::UpdateEntry => "update_entry",
            Self::ToggleEntryStatus => "toggle_entry_status",
        }
    }
}

impl fmt::Display for GuardedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The context had no company; enforcement was skipped.
    Bypassed,
    /// Every competence date was within the open period.
    Admitted {
        /// The company whose period was checked.
        company_id: CompanyId,
        /// The period read for this check, `None` if the company has none.
        accounting_period: Option<NaiveDate>,
    },
}

impl Admission {
    /// Returns true if enforcement was skipped.
    #[must_use]
    pub const fn is_bypassed(&self) -> bool {
        matches!(self, Self::Bypassed)
    }

    /// The period the operation was checked against, if any.
    #[must_use]
    pub const fn accounting_period(&self) -> Option<NaiveDate> {
        match self {
            Self::Bypassed => None,
            Self::Admitted { accounting_period, .. } => *accounting_period,
        }
    }
}

/// Point-in-time admission check against the company's accounting period.
pub struct PeriodEnforcement;

impl PeriodEnforcement {
    /// Checks `dates` against the acting company's current accounting period.
    ///
    /// The company is read through `companies` on every call; nothing is
    /// cached, so a period change committed before this read is observed.
    ///
    /// # Errors
    ///
    /// - [`PeriodError::Locked`] for the first date before the period
    /// - [`PeriodError::CompanyNotFound`] if the context names a missing company
    /// - [`PeriodError::Store`] if reading the company fails
    pub async fn admit<C>(
        companies: &C,
        ctx: &RequestContext,
        operation: GuardedOperation,
        dates: &[NaiveDate],
    ) -> Result<Admission, PeriodError>
    where
        C: CompanyLookup + ?Sized,
    {
        let Some(company_id) = ctx.company_id else {
            warn!(
                operation = %operation,
                "No company in request context, skipping period enforcement"
            );
            return Ok(Admission::Bypassed);
        };

        let Some(company) = companies.find_company(company_id).await? else {
            error!(
                operation = %operation,
                company_id = %company_id,
                "Company referenced by request context does not exist"
            );
            return Err(PeriodError::CompanyNotFound(company_id));
        };

        for &date in dates {
            if let Err(violation) = guard::check(date, company.accounting_period) {
                info!(
                    operation = %operation,
                    company_id = %company_id,
                    competence_date = %violation.competence_date,
                    accounting_period = %violation.accounting_period,
                    "Rejected mutation in locked accounting period"
                );
                return Err(violation.into());
            }
        }

        debug!(
            operation = %operation,
            company_id = %company_id,
            dates = dates.len(),
            "Period enforcement admitted operation"
        );

        Ok(Admission::Admitted {
            company_id,
            accounting_period: company.accounting_period,
        })
    }

    /// Runs `op` only if [`admit`](Self::admit) succeeds for `dates`.
    ///
    /// On rejection `op` is never polled, so no part of it executes.
    ///
    /// # Errors
    ///
    /// Returns the admission error converted into `E`, or whatever `op` returns.
    pub async fn guarded<C, F, Fut, T, E>(
        companies: &C,
        ctx: &RequestContext,
        operation: GuardedOperation,
        dates: &[NaiveDate],
        op: F,
    ) -> Result<T, E>
    where
        C: CompanyLookup + ?Sized,
        F: FnOnce(Admission) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<PeriodError>,
    {
        let admission = Self::admit(companies, ctx, operation, dates).await?;
        op(admission).await
    }
}
