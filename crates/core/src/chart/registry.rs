//! Chart of accounts registry.

use tracing::info;

use ecf_shared::types::{AccountId, CompanyId};

use super::error::ChartError;
use super::rules::{validate_account_update, validate_new_account};
use super::types::{AccountFilter, ChartOfAccount, CreateAccountInput, UpdateAccountInput};
use crate::ports::{ChartStore, StoreError};
use crate::status::RecordStatus;

/// Registry owning chart-of-accounts creation and maintenance.
///
/// Accounts of another company are reported as not found.
pub struct ChartOfAccountsRegistry;

impl ChartOfAccountsRegistry {
    /// Creates an account in `ACTIVE` status.
    ///
    /// # Errors
    ///
    /// - [`ChartError::Invalid`] if a field rule fails
    /// - [`ChartError::DuplicateCode`] if the code exists for the company and fiscal year
    /// - [`ChartError::ReferenceAccountNotFound`] if the reference account is unknown
    pub async fn create<S>(
        store: &S,
        company_id: CompanyId,
        input: CreateAccountInput,
    ) -> Result<ChartOfAccount, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        validate_new_account(&input)?;
        let code = input.code.trim().to_string();

        if store
            .find_account_by_code(company_id, input.fiscal_year, &code)
            .await?
            .is_some()
        {
            return Err(ChartError::DuplicateCode {
                code,
                fiscal_year: input.fiscal_year,
            });
        }

        if !store
            .reference_account_exists(input.reference_account_id)
            .await?
        {
            return Err(ChartError::ReferenceAccountNotFound(
                input.reference_account_id,
            ));
        }

        let fiscal_year = input.fiscal_year;
        let account = ChartOfAccount {
            id: AccountId::new(),
            company_id,
            code: code.clone(),
            name: input.name.trim().to_string(),
            fiscal_year,
            account_type: input.account_type,
            reference_account_id: input.reference_account_id,
            classe: input.classe,
            level: input.level,
            nature: input.nature,
            affects_result: input.affects_result,
            deductible: input.deductible,
            status: RecordStatus::Active,
        };

        let saved = store.save_account(account).await.map_err(|e| match e {
            StoreError::DuplicateKey(_) => ChartError::DuplicateCode {
                code: code.clone(),
                fiscal_year,
            },
            other => ChartError::Store(other),
        })?;

        info!(
            company_id = %company_id,
            account_id = %saved.id,
            code = %saved.code,
            fiscal_year = saved.fiscal_year,
            "Chart account created"
        );

        Ok(saved)
    }

    /// Updates the mutable fields of an account.
    ///
    /// # Errors
    ///
    /// - [`ChartError::AccountNotFound`] if the account is missing or belongs to another company
    /// - [`ChartError::Invalid`] if a field rule fails
    /// - [`ChartError::ReferenceAccountNotFound`] if a new reference account is unknown
    pub async fn update<S>(
        store: &S,
        company_id: CompanyId,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<ChartOfAccount, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        validate_account_update(&input)?;
        let mut account = Self::get(store, company_id, id).await?;

        if let Some(reference) = input.reference_account_id
            && reference != account.reference_account_id
        {
            if !store.reference_account_exists(reference).await? {
                return Err(ChartError::ReferenceAccountNotFound(reference));
            }
            account.reference_account_id = reference;
        }

        if let Some(name) = input.name {
            account.name = name.trim().to_string();
        }
        if let Some(account_type) = input.account_type {
            account.account_type = account_type;
        }
        if let Some(classe) = input.classe {
            account.classe = classe;
        }
        if let Some(level) = input.level {
            account.level = level;
        }
        if let Some(nature) = input.nature {
            account.nature = nature;
        }
        if let Some(affects_result) = input.affects_result {
            account.affects_result = affects_result;
        }
        if let Some(deductible) = input.deductible {
            account.deductible = deductible;
        }

        Ok(store.save_account(account).await?)
    }

    /// Sets the account status. Deactivation is the only form of deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::AccountNotFound`] if the account is missing.
    pub async fn set_status<S>(
        store: &S,
        company_id: CompanyId,
        id: AccountId,
        status: RecordStatus,
    ) -> Result<ChartOfAccount, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        let mut account = Self::get(store, company_id, id).await?;
        if account.status == status {
            return Ok(account);
        }
        account.status = status;
        let saved = store.save_account(account).await?;

        info!(
            company_id = %company_id,
            account_id = %saved.id,
            status = %saved.status,
            "Chart account status changed"
        );

        Ok(saved)
    }

    /// Deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::AccountNotFound`] if the account is missing.
    pub async fn deactivate<S>(
        store: &S,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<ChartOfAccount, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        Self::set_status(store, company_id, id, RecordStatus::Inactive).await
    }

    /// Fetches an account of the company.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::AccountNotFound`] if the account is missing.
    pub async fn get<S>(
        store: &S,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<ChartOfAccount, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        store
            .find_account(id)
            .await?
            .filter(|account| account.company_id == company_id)
            .ok_or(ChartError::AccountNotFound(id))
    }

    /// Lists the company's accounts.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Store`] if the store fails.
    pub async fn list<S>(
        store: &S,
        company_id: CompanyId,
        filter: &AccountFilter,
    ) -> Result<Vec<ChartOfAccount>, ChartError>
    where
        S: ChartStore + ?Sized,
    {
        Ok(store.list_accounts(company_id, filter).await?)
    }
}
