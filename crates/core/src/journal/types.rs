//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ecf_shared::types::{AccountId, CompanyId, JournalEntryId};

use crate::period::Temporal;
use crate::status::RecordStatus;

/// A single debit/credit posting between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Data de competência; the date period enforcement checks.
    pub competence_date: NaiveDate,
    /// Account debited.
    pub debit_account_id: AccountId,
    /// Account credited.
    pub credit_account_id: AccountId,
    /// Posted amount, always positive.
    pub amount: Decimal,
    /// Free-text history (histórico).
    pub description: String,
    /// Fiscal year both accounts must belong to.
    pub fiscal_year: i32,
    /// Active or soft-deleted.
    pub status: RecordStatus,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last written.
    pub updated_at: DateTime<Utc>,
}

impl Temporal for JournalEntry {
    fn competence_date(&self) -> NaiveDate {
        self.competence_date
    }
}

/// Data supplied to create an entry or to replace an entry's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryInput {
    /// Data de competência.
    pub competence_date: NaiveDate,
    /// Account debited.
    pub debit_account_id: AccountId,
    /// Account credited.
    pub credit_account_id: AccountId,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Free-text history.
    pub description: String,
    /// Fiscal year of the entry.
    pub fiscal_year: i32,
}

impl Temporal for JournalEntryInput {
    fn competence_date(&self) -> NaiveDate {
        self.competence_date
    }
}

impl JournalEntryInput {
    /// Builds the input that would recreate `entry`'s data.
    #[must_use]
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            competence_date: entry.competence_date,
            debit_account_id: entry.debit_account_id,
            credit_account_id: entry.credit_account_id,
            amount: entry.amount,
            description: entry.description.clone(),
            fiscal_year: entry.fiscal_year,
        }
    }
}

/// Filter options for listing entries.
///
/// Inactive entries are excluded unless `include_inactive` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Restrict to one company. The service fills this from the request context.
    pub company_id: Option<CompanyId>,
    /// Only entries debiting this account.
    pub debit_account_id: Option<AccountId>,
    /// Only entries crediting this account.
    pub credit_account_id: Option<AccountId>,
    /// Only entries with exactly this competence date.
    pub date: Option<NaiveDate>,
    /// Only entries on or after this date.
    pub date_from: Option<NaiveDate>,
    /// Only entries on or before this date.
    pub date_to: Option<NaiveDate>,
    /// Only entries of this fiscal year.
    pub fiscal_year: Option<i32>,
    /// Include soft-deleted entries.
    #[serde(default)]
    pub include_inactive: bool,
}

impl EntryFilter {
    /// Returns true if `entry` passes every set criterion.
    #[must_use]
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        self.company_id.is_none_or(|id| entry.company_id == id)
            && self.debit_account_id.is_none_or(|id| entry.debit_account_id == id)
            && self.credit_account_id.is_none_or(|id| entry.credit_account_id == id)
            && self.date.is_none_or(|d| entry.competence_date == d)
            && self.date_from.is_none_or(|d| entry.competence_date >= d)
            && self.date_to.is_none_or(|d| entry.competence_date <= d)
            && self.fiscal_year.is_none_or(|y| entry.fiscal_year == y)
            && (self.include_inactive || entry.status.is_active())
    }
}
