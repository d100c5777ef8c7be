//! Journal entry repository.
//!
//! Every mutation begins a transaction, runs [`JournalEntryService`] against a
//! store bound to it, and commits only on success. The company's accounting
//! period is therefore read inside the same transaction as the write.

use sea_orm::{DatabaseConnection, TransactionTrait};

use ecf_core::RequestContext;
use ecf_core::journal::{
    EntryFilter, JournalEntry, JournalEntryInput, JournalEntryService, JournalError,
};
use ecf_shared::types::{JournalEntryId, PageRequest, PageResponse};

use crate::store::{SeaOrmStore, finish, store_error};

/// Journal entry repository.
#[derive(Debug, Clone)]
pub struct JournalEntryRepository {
    db: DatabaseConnection,
}

impl JournalEntryRepository {
    /// Creates a new journal entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// See [`JournalEntryService::create`].
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = JournalEntryService::create(&SeaOrmStore::new(&txn), ctx, input).await;
        finish(txn, result).await
    }

    /// Replaces the data of an entry.
    ///
    /// # Errors
    ///
    /// See [`JournalEntryService::update`].
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: JournalEntryId,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = JournalEntryService::update(&SeaOrmStore::new(&txn), ctx, id, input).await;
        finish(txn, result).await
    }

    /// Flips an entry between active and inactive.
    ///
    /// # Errors
    ///
    /// See [`JournalEntryService::toggle_status`].
    pub async fn toggle_status(
        &self,
        ctx: &RequestContext,
        id: JournalEntryId,
    ) -> Result<JournalEntry, JournalError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = JournalEntryService::toggle_status(&SeaOrmStore::new(&txn), ctx, id).await;
        finish(txn, result).await
    }

    /// Fetches an entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::NotFound`] if the entry is not visible to the context.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: JournalEntryId,
    ) -> Result<JournalEntry, JournalError> {
        JournalEntryService::get(&SeaOrmStore::new(&self.db), ctx, id).await
    }

    /// Lists entries ordered by competence date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, JournalError> {
        JournalEntryService::list(&SeaOrmStore::new(&self.db), ctx, filter, page).await
    }
}
