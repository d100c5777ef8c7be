//! Chart of accounts repository.
//!
//! Runs [`ChartOfAccountsRegistry`] operations against the database. Each
//! mutation is one transaction, so the duplicate-code check and the insert
//! see the same snapshot and the unique constraint backs up the check.

use sea_orm::{DatabaseConnection, TransactionTrait};

use ecf_core::RecordStatus;
use ecf_core::chart::{
    AccountFilter, ChartError, ChartOfAccount, ChartOfAccountsRegistry, CreateAccountInput,
    UpdateAccountInput,
};
use ecf_shared::types::{AccountId, CompanyId};

use crate::store::{SeaOrmStore, finish, store_error};

/// Chart of accounts repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account for the company.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountsRegistry::create`].
    pub async fn create(
        &self,
        company_id: CompanyId,
        input: CreateAccountInput,
    ) -> Result<ChartOfAccount, ChartError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result = ChartOfAccountsRegistry::create(&SeaOrmStore::new(&txn), company_id, input).await;
        finish(txn, result).await
    }

    /// Updates the mutable fields of an account.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountsRegistry::update`].
    pub async fn update(
        &self,
        company_id: CompanyId,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<ChartOfAccount, ChartError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result =
            ChartOfAccountsRegistry::update(&SeaOrmStore::new(&txn), company_id, id, input).await;
        finish(txn, result).await
    }

    /// Sets the account status.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountsRegistry::set_status`].
    pub async fn set_status(
        &self,
        company_id: CompanyId,
        id: AccountId,
        status: RecordStatus,
    ) -> Result<ChartOfAccount, ChartError> {
        let txn = self.db.begin().await.map_err(store_error)?;
        let result =
            ChartOfAccountsRegistry::set_status(&SeaOrmStore::new(&txn), company_id, id, status)
                .await;
        finish(txn, result).await
    }

    /// Deactivates an account.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountsRegistry::deactivate`].
    pub async fn deactivate(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<ChartOfAccount, ChartError> {
        self.set_status(company_id, id, RecordStatus::Inactive).await
    }

    /// Fetches an account of the company.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::AccountNotFound`] if the account is missing.
    pub async fn get(&self, company_id: CompanyId, id: AccountId) -> Result<ChartOfAccount, ChartError> {
        ChartOfAccountsRegistry::get(&SeaOrmStore::new(&self.db), company_id, id).await
    }

    /// Lists the company's accounts ordered by fiscal year and code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        company_id: CompanyId,
        filter: &AccountFilter,
    ) -> Result<Vec<ChartOfAccount>, ChartError> {
        ChartOfAccountsRegistry::list(&SeaOrmStore::new(&self.db), company_id, filter).await
    }
}
