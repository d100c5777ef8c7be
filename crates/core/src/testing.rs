//! In-memory store and fixtures for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use ecf_shared::types::{
    AccountId, CompanyId, JournalEntryId, PageRequest, PageResponse, ReferenceAccountId,
};

use crate::chart::{AccountClass, AccountFilter, AccountNature, AccountType, ChartOfAccount};
use crate::company::Company;
use crate::journal::{EntryFilter, JournalEntry};
use crate::ports::{
    AccountLookup, ChartStore, CompanyLookup, JournalEntryStore, ReferenceAccountLookup,
    StoreError,
};
use crate::status::RecordStatus;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// An asset account with a fresh id.
pub(crate) fn account(company_id: CompanyId, fiscal_year: i32, status: RecordStatus) -> ChartOfAccount {
    let id = AccountId::new();
    ChartOfAccount {
        id,
        company_id,
        code: format!("1.1.{id}"),
        name: "Caixa".to_string(),
        fiscal_year,
        account_type: AccountType::Asset,
        reference_account_id: ReferenceAccountId::new(),
        classe: AccountClass::Asset,
        level: 5,
        nature: AccountNature::Debit,
        affects_result: false,
        deductible: false,
        status,
    }
}

#[derive(Default)]
struct State {
    companies: HashMap<CompanyId, Company>,
    reference_accounts: HashSet<ReferenceAccountId>,
    accounts: HashMap<AccountId, ChartOfAccount>,
    entries: HashMap<JournalEntryId, JournalEntry>,
}

#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn add_company(&self, accounting_period: Option<NaiveDate>) -> CompanyId {
        let id = CompanyId::new();
        self.state().companies.insert(
            id,
            Company {
                id,
                name: "Empresa Teste Ltda".to_string(),
                cnpj: None,
                accounting_period,
            },
        );
        id
    }

    pub(crate) fn set_accounting_period(&self, company_id: CompanyId, period: Option<NaiveDate>) {
        if let Some(company) = self.state().companies.get_mut(&company_id) {
            company.accounting_period = period;
        }
    }

    pub(crate) fn add_reference_account(&self) -> ReferenceAccountId {
        let id = ReferenceAccountId::new();
        self.state().reference_accounts.insert(id);
        id
    }

    pub(crate) fn add_account(
        &self,
        company_id: CompanyId,
        fiscal_year: i32,
        status: RecordStatus,
    ) -> AccountId {
        let account = account(company_id, fiscal_year, status);
        let id = account.id;
        self.state().accounts.insert(id, account);
        id
    }

    pub(crate) fn set_account_status(&self, id: AccountId, status: RecordStatus) {
        if let Some(account) = self.state().accounts.get_mut(&id) {
            account.status = status;
        }
    }

    pub(crate) fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.state().entries.get(&id).cloned()
    }

    pub(crate) fn set_entry_status(&self, id: JournalEntryId, status: RecordStatus) {
        if let Some(entry) = self.state().entries.get_mut(&id) {
            entry.status = status;
        }
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.state().entries.len()
    }
}

#[async_trait]
impl CompanyLookup for InMemoryStore {
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.state().companies.get(&id).cloned())
    }
}

#[async_trait]
impl AccountLookup for InMemoryStore {
    async fn find_account(&self, id: AccountId) -> Result<Option<ChartOfAccount>, StoreError> {
        Ok(self.state().accounts.get(&id).cloned())
    }
}

#[async_trait]
impl ReferenceAccountLookup for InMemoryStore {
    async fn reference_account_exists(&self, id: ReferenceAccountId) -> Result<bool, StoreError> {
        Ok(self.state().reference_accounts.contains(&id))
    }
}

#[async_trait]
impl ChartStore for InMemoryStore {
    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        fiscal_year: i32,
        code: &str,
    ) -> Result<Option<ChartOfAccount>, StoreError> {
        Ok(self
            .state()
            .accounts
            .values()
            .find(|a| a.company_id == company_id && a.fiscal_year == fiscal_year && a.code == code)
            .cloned())
    }

    async fn save_account(&self, account: ChartOfAccount) -> Result<ChartOfAccount, StoreError> {
        let mut state = self.state();
        let clash = state.accounts.values().any(|a| {
            a.id != account.id
                && a.company_id == account.company_id
                && a.fiscal_year == account.fiscal_year
                && a.code == account.code
        });
        if clash {
            return Err(StoreError::DuplicateKey("uq_chart_of_accounts_code".to_string()));
        }
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list_accounts(
        &self,
        company_id: CompanyId,
        filter: &AccountFilter,
    ) -> Result<Vec<ChartOfAccount>, StoreError> {
        let mut accounts: Vec<_> = self
            .state()
            .accounts
            .values()
            .filter(|a| a.company_id == company_id && filter.matches(a))
            .cloned()
            .collect();
        accounts.sort_by(|a, b| (a.fiscal_year, &a.code).cmp(&(b.fiscal_year, &b.code)));
        Ok(accounts)
    }
}

#[async_trait]
impl JournalEntryStore for InMemoryStore {
    async fn find_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, StoreError> {
        Ok(self.entry(id))
    }

    async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        self.state().entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_entry_data(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        let mut state = self.state();
        let stored = state
            .entries
            .get_mut(&entry.id)
            .ok_or_else(|| StoreError::Database(format!("entry {} missing", entry.id)))?;
        *stored = JournalEntry {
            status: stored.status,
            created_at: stored.created_at,
            ..entry
        };
        Ok(stored.clone())
    }

    async fn update_entry_status(
        &self,
        id: JournalEntryId,
        from: RecordStatus,
        to: RecordStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<JournalEntry, StoreError> {
        let mut state = self.state();
        match state.entries.get_mut(&id) {
            Some(stored) if stored.status == from => {
                stored.status = to;
                stored.updated_at = updated_at;
                Ok(stored.clone())
            }
            _ => Err(StoreError::Conflict(format!("entry {id} is no longer {from}"))),
        }
    }

    async fn list_entries(
        &self,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, StoreError> {
        let mut entries: Vec<_> = self
            .state()
            .entries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.competence_date, e.id));

        let total = entries.len() as u64;
        let data = entries
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap())
            .take(usize::try_from(page.limit()).unwrap())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
