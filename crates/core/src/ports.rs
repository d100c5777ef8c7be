//! Persistence ports consumed by the core services.
//!
//! Every mutation in `ecf-db` hands the services a store that is bound to a
//! single database transaction, so reads through these traits observe the
//! committed state at the time of the call and writes commit together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use ecf_shared::types::{AccountId, CompanyId, JournalEntryId, PageRequest, PageResponse, ReferenceAccountId};

use crate::chart::{AccountFilter, ChartOfAccount};
use crate::company::Company;
use crate::journal::{EntryFilter, JournalEntry};
use crate::status::RecordStatus;

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The row changed since it was read.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backing database failed.
    #[error("Database error: {0}")]
    Database(String),
}

/// Read access to company records.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    /// Finds a company by id.
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;
}

/// Read access to chart-of-accounts rows.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Finds an account by id, regardless of company or status.
    async fn find_account(&self, id: AccountId) -> Result<Option<ChartOfAccount>, StoreError>;
}

/// Read access to the regulatory reference plan.
#[async_trait]
pub trait ReferenceAccountLookup: Send + Sync {
    /// Returns true if the reference account exists.
    async fn reference_account_exists(&self, id: ReferenceAccountId) -> Result<bool, StoreError>;
}

/// Write access to the chart of accounts.
#[async_trait]
pub trait ChartStore: AccountLookup + ReferenceAccountLookup {
    /// Finds an account by its natural key.
    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        fiscal_year: i32,
        code: &str,
    ) -> Result<Option<ChartOfAccount>, StoreError>;

    /// Inserts or updates an account and returns the stored row.
    async fn save_account(&self, account: ChartOfAccount) -> Result<ChartOfAccount, StoreError>;

    /// Lists accounts of a company ordered by fiscal year and code.
    async fn list_accounts(
        &self,
        company_id: CompanyId,
        filter: &AccountFilter,
    ) -> Result<Vec<ChartOfAccount>, StoreError>;
}

/// Persistence of journal entries.
#[async_trait]
pub trait JournalEntryStore: Send + Sync {
    /// Finds an entry by id.
    async fn find_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, StoreError>;

    /// Inserts a new entry and returns the stored row.
    async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError>;

    /// Writes the data columns of an existing entry and returns the stored row.
    ///
    /// `status` and `created_at` are left as stored.
    async fn update_entry_data(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError>;

    /// Moves an entry from `from` to `to` and returns the stored row.
    ///
    /// Fails with [`StoreError::Conflict`] if the stored status is no longer
    /// `from`.
    async fn update_entry_status(
        &self,
        id: JournalEntryId,
        from: RecordStatus,
        to: RecordStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<JournalEntry, StoreError>;

    /// Lists entries matching the filter, ordered by competence date then id.
    async fn list_entries(
        &self,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, StoreError>;
}

/// Everything the journal entry lifecycle needs within one transaction.
pub trait LedgerStore: CompanyLookup + AccountLookup + JournalEntryStore {}

impl<T> LedgerStore for T where T: CompanyLookup + AccountLookup + JournalEntryStore + ?Sized {}
