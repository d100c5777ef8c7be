//! Journal entry lifecycle service.
//!
//! This is the only write path for journal entries. Every mutation runs
//! period enforcement first, then the validator, then a single save; any
//! failure returns before the save, so nothing is partially written.
//! The caller supplies a store bound to one transaction and commits it only
//! when the service returns `Ok`.

use chrono::Utc;
use tracing::{debug, info};

use ecf_shared::types::{CompanyId, JournalEntryId, PageRequest, PageResponse};

use super::error::JournalError;
use super::types::{EntryFilter, JournalEntry, JournalEntryInput};
use super::validator::validate;
use crate::chart::ChartOfAccount;
use crate::context::RequestContext;
use crate::period::{Admission, GuardedOperation, PeriodEnforcement};
use crate::ports::{AccountLookup, LedgerStore, StoreError};
use crate::status::RecordStatus;

/// Lifecycle service for journal entries.
///
/// Status moves only between `ACTIVE` and `INACTIVE`; entries start `ACTIVE`.
/// Entries outside the context's company are reported as not found. A
/// context without a company (system job) skips period enforcement and acts
/// on the company owning the referenced accounts.
pub struct JournalEntryService;

impl JournalEntryService {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// - [`JournalError::PeriodLockViolation`] if the competence date is locked
    /// - [`JournalError::Validation`] if the validator rejects the entry
    /// - [`JournalError::IllegalState`] if the context's company has no record
    pub async fn create<S>(
        store: &S,
        ctx: &RequestContext,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let dates = [input.competence_date];
        PeriodEnforcement::guarded(store, ctx, GuardedOperation::CreateEntry, &dates, |admission| {
            Self::create_admitted(store, ctx, admission, input)
        })
        .await
    }

    async fn create_admitted<S>(
        store: &S,
        ctx: &RequestContext,
        admission: Admission,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let (debit, credit) = resolve_accounts(store, ctx.company_id, &input).await?;
        validate(&input, debit.as_ref(), credit.as_ref())?;

        let company_id = ctx
            .company_id
            .or_else(|| debit.as_ref().map(|account| account.company_id))
            .ok_or_else(|| {
                JournalError::IllegalState("validated entry has no owning company".to_string())
            })?;

        let now = Utc::now();
        let entry = JournalEntry {
            id: JournalEntryId::new(),
            company_id,
            competence_date: input.competence_date,
            debit_account_id: input.debit_account_id,
            credit_account_id: input.credit_account_id,
            amount: input.amount,
            description: input.description,
            fiscal_year: input.fiscal_year,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let saved = store.insert_entry(entry).await?;

        info!(
            entry_id = %saved.id,
            company_id = %saved.company_id,
            user_id = ?ctx.user_id,
            competence_date = %saved.competence_date,
            amount = %saved.amount,
            accounting_period = ?admission.accounting_period(),
            period_bypassed = admission.is_bypassed(),
            "Journal entry created"
        );

        Ok(saved)
    }

    /// Replaces the data of an existing entry. The status is left as stored.
    ///
    /// Enforcement covers the stored competence date, so a locked entry cannot
    /// be moved out of its period, and the new date when it changes.
    ///
    /// # Errors
    ///
    /// - [`JournalError::NotFound`] if the entry does not exist for the company
    /// - [`JournalError::PeriodLockViolation`] if either date is locked
    /// - [`JournalError::Validation`] if the validator rejects the new data
    pub async fn update<S>(
        store: &S,
        ctx: &RequestContext,
        id: JournalEntryId,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let existing = load(store, ctx, id).await?;

        let mut dates = vec![existing.competence_date];
        if input.competence_date != existing.competence_date {
            dates.push(input.competence_date);
        }

        PeriodEnforcement::guarded(store, ctx, GuardedOperation::UpdateEntry, &dates, |admission| {
            Self::update_admitted(store, admission, existing, input)
        })
        .await
    }

    async fn update_admitted<S>(
        store: &S,
        admission: Admission,
        existing: JournalEntry,
        input: JournalEntryInput,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let (debit, credit) = resolve_accounts(store, Some(existing.company_id), &input).await?;
        validate(&input, debit.as_ref(), credit.as_ref())?;

        let updated = JournalEntry {
            competence_date: input.competence_date,
            debit_account_id: input.debit_account_id,
            credit_account_id: input.credit_account_id,
            amount: input.amount,
            description: input.description,
            fiscal_year: input.fiscal_year,
            updated_at: Utc::now(),
            ..existing
        };

        let saved = store.update_entry_data(updated).await?;

        info!(
            entry_id = %saved.id,
            company_id = %saved.company_id,
            competence_date = %saved.competence_date,
            accounting_period = ?admission.accounting_period(),
            period_bypassed = admission.is_bypassed(),
            "Journal entry updated"
        );

        Ok(saved)
    }

    /// Flips the entry between `ACTIVE` and `INACTIVE`.
    ///
    /// The accounts were validated when the entry was written and are not
    /// checked again. Only the status is written, and only if it still holds
    /// the value read at load.
    ///
    /// # Errors
    ///
    /// - [`JournalError::NotFound`] if the entry does not exist for the company
    /// - [`JournalError::PeriodLockViolation`] if the entry's date is locked
    /// - [`JournalError::Store`] with [`StoreError::Conflict`] if the status
    ///   changed concurrently
    pub async fn toggle_status<S>(
        store: &S,
        ctx: &RequestContext,
        id: JournalEntryId,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let existing = load(store, ctx, id).await?;
        let dates = [existing.competence_date];

        PeriodEnforcement::guarded(store, ctx, GuardedOperation::ToggleEntryStatus, &dates, |admission| {
            Self::toggle_admitted(store, admission, existing)
        })
        .await
    }

    async fn toggle_admitted<S>(
        store: &S,
        admission: Admission,
        existing: JournalEntry,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        let saved = store
            .update_entry_status(
                existing.id,
                existing.status,
                existing.status.toggled(),
                Utc::now(),
            )
            .await?;

        info!(
            entry_id = %saved.id,
            company_id = %saved.company_id,
            status = %saved.status,
            accounting_period = ?admission.accounting_period(),
            period_bypassed = admission.is_bypassed(),
            "Journal entry status toggled"
        );

        Ok(saved)
    }

    /// Fetches a single entry. Read-only; no period enforcement.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::NotFound`] if the entry does not exist for the company.
    pub async fn get<S>(
        store: &S,
        ctx: &RequestContext,
        id: JournalEntryId,
    ) -> Result<JournalEntry, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        load(store, ctx, id).await
    }

    /// Lists entries. Read-only; no period enforcement.
    ///
    /// A tenant-scoped context always restricts the listing to its company,
    /// whatever `filter.company_id` says.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Store`] if the store fails.
    pub async fn list<S>(
        store: &S,
        ctx: &RequestContext,
        mut filter: EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, JournalError>
    where
        S: LedgerStore + ?Sized,
    {
        if let Some(company_id) = ctx.company_id {
            filter.company_id = Some(company_id);
        }
        let page = page.normalized();

        debug!(
            company_id = ?filter.company_id,
            include_inactive = filter.include_inactive,
            page = page.page,
            per_page = page.per_page,
            "Listing journal entries"
        );

        Ok(store.list_entries(&filter, page).await?)
    }
}

/// Loads an entry visible to the context.
async fn load<S>(
    store: &S,
    ctx: &RequestContext,
    id: JournalEntryId,
) -> Result<JournalEntry, JournalError>
where
    S: LedgerStore + ?Sized,
{
    store
        .find_entry(id)
        .await?
        .filter(|entry| ctx.company_id.is_none_or(|company| entry.company_id == company))
        .ok_or_else(|| JournalError::entry_not_found(id))
}

/// Resolves both accounts of `input` within `scope`.
///
/// An account of another company resolves to `None`. Without a scope the
/// debit account's company becomes the scope for the credit account.
async fn resolve_accounts<S>(
    store: &S,
    scope: Option<CompanyId>,
    input: &JournalEntryInput,
) -> Result<(Option<ChartOfAccount>, Option<ChartOfAccount>), StoreError>
where
    S: AccountLookup + ?Sized,
{
    let in_scope = |scope: Option<CompanyId>, account: &ChartOfAccount| {
        scope.is_none_or(|company| account.company_id == company)
    };

    let debit = store
        .find_account(input.debit_account_id)
        .await?
        .filter(|account| in_scope(scope, account));

    let scope = scope.or_else(|| debit.as_ref().map(|account| account.company_id));

    let credit = store
        .find_account(input.credit_account_id)
        .await?
        .filter(|account| in_scope(scope, account));

    Ok((debit, credit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::error::ValidationError;
    use crate::ports::{CompanyLookup, JournalEntryStore};
    use crate::testing::{InMemoryStore, date};
    use ecf_shared::types::{AccountId, UserId};
    use rust_decimal_macros::dec;

    struct Fixture {
        store: InMemoryStore,
        ctx: RequestContext,
        debit: AccountId,
        credit: AccountId,
    }

    fn fixture(period: Option<chrono::NaiveDate>) -> Fixture {
        let store = InMemoryStore::new();
        let company = store.add_company(period);
        let debit = store.add_account(company, 2024, RecordStatus::Active);
        let credit = store.add_account(company, 2024, RecordStatus::Active);
        Fixture {
            store,
            ctx: RequestContext::for_company(company, UserId::new()),
            debit,
            credit,
        }
    }

    fn input(f: &Fixture, competence: chrono::NaiveDate) -> JournalEntryInput {
        JournalEntryInput {
            competence_date: competence,
            debit_account_id: f.debit,
            credit_account_id: f.credit,
            amount: dec!(100.00),
            description: "Pagamento de fornecedor".to_string(),
            fiscal_year: 2024,
        }
    }

    #[tokio::test]
    async fn test_scenario_a_create_in_locked_period() {
        let f = fixture(Some(date(2024, 6, 1)));

        let result = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 5, 15))).await;

        assert!(matches!(
            result,
            Err(JournalError::PeriodLockViolation { competence_date, accounting_period })
                if competence_date == date(2024, 5, 15) && accounting_period == date(2024, 6, 1)
        ));
        assert_eq!(f.store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_scenario_b_create_succeeds() {
        let f = fixture(Some(date(2024, 1, 1)));

        let entry = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        assert_eq!(entry.status, RecordStatus::Active);
        assert_eq!(Some(entry.company_id), f.ctx.company_id);
        assert_eq!(entry.amount, dec!(100.00));
        assert_eq!(f.store.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_scenario_c_inactive_credit_account() {
        let f = fixture(Some(date(2024, 1, 1)));
        f.store.set_account_status(f.credit, RecordStatus::Inactive);

        let result = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1))).await;

        assert!(matches!(
            result,
            Err(JournalError::Validation(ValidationError::InactiveAccount(id))) if id == f.credit
        ));
        assert_eq!(f.store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_scenario_d_update_of_locked_entry_is_rejected() {
        let f = fixture(None);
        let mut original = input(&f, date(2023, 12, 1));
        original.fiscal_year = 2023;
        let debit_2023 = f.store.add_account(f.ctx.company_id.unwrap(), 2023, RecordStatus::Active);
        let credit_2023 = f.store.add_account(f.ctx.company_id.unwrap(), 2023, RecordStatus::Active);
        original.debit_account_id = debit_2023;
        original.credit_account_id = credit_2023;
        let stored = JournalEntryService::create(&f.store, &f.ctx, original).await.unwrap();

        f.store.set_accounting_period(f.ctx.company_id.unwrap(), Some(date(2024, 1, 1)));

        let result =
            JournalEntryService::update(&f.store, &f.ctx, stored.id, input(&f, date(2024, 2, 1))).await;

        assert!(matches!(
            result,
            Err(JournalError::PeriodLockViolation { competence_date, .. })
                if competence_date == date(2023, 12, 1)
        ));
        assert_eq!(f.store.entry(stored.id), Some(stored));
    }

    #[tokio::test]
    async fn test_update_cannot_move_entry_into_locked_period() {
        let f = fixture(Some(date(2024, 3, 1)));
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 4, 1)))
            .await
            .unwrap();

        let result =
            JournalEntryService::update(&f.store, &f.ctx, stored.id, input(&f, date(2024, 2, 1))).await;

        assert!(matches!(
            result,
            Err(JournalError::PeriodLockViolation { competence_date, .. })
                if competence_date == date(2024, 2, 1)
        ));
        assert_eq!(f.store.entry(stored.id), Some(stored));
    }

    #[tokio::test]
    async fn test_update_merges_new_data() {
        let f = fixture(Some(date(2024, 1, 1)));
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        let mut changed = input(&f, date(2024, 3, 5));
        changed.amount = dec!(250.10);
        changed.description = "Ajuste".to_string();
        std::mem::swap(&mut changed.debit_account_id, &mut changed.credit_account_id);

        let updated = JournalEntryService::update(&f.store, &f.ctx, stored.id, changed)
            .await
            .unwrap();

        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.status, RecordStatus::Active);
        assert_eq!(updated.competence_date, date(2024, 3, 5));
        assert_eq!(updated.amount, dec!(250.10));
        assert_eq!(updated.debit_account_id, f.credit);
        assert_eq!(f.store.entry(stored.id), Some(updated));
    }

    #[tokio::test]
    async fn test_update_revalidates_accounts() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        let mut same = input(&f, date(2024, 3, 1));
        same.credit_account_id = same.debit_account_id;

        let result = JournalEntryService::update(&f.store, &f.ctx, stored.id, same).await;
        assert!(matches!(
            result,
            Err(JournalError::Validation(ValidationError::SameAccount(_)))
        ));
        assert_eq!(f.store.entry(stored.id), Some(stored));
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let f = fixture(None);
        let id = JournalEntryId::new();
        let result = JournalEntryService::update(&f.store, &f.ctx, id, input(&f, date(2024, 3, 1))).await;
        assert!(matches!(result, Err(JournalError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_entry() {
        let f = fixture(Some(date(2024, 1, 1)));
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        let once = JournalEntryService::toggle_status(&f.store, &f.ctx, stored.id)
            .await
            .unwrap();
        assert_eq!(once.status, RecordStatus::Inactive);

        let twice = JournalEntryService::toggle_status(&f.store, &f.ctx, stored.id)
            .await
            .unwrap();
        assert_eq!(twice.status, RecordStatus::Active);
        assert_eq!(
            JournalEntry {
                updated_at: stored.updated_at,
                ..twice
            },
            stored
        );
    }

    #[tokio::test]
    async fn test_toggle_in_locked_period_is_rejected() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        f.store.set_accounting_period(f.ctx.company_id.unwrap(), Some(date(2024, 4, 1)));

        let result = JournalEntryService::toggle_status(&f.store, &f.ctx, stored.id).await;
        assert!(matches!(result, Err(JournalError::PeriodLockViolation { .. })));
        assert_eq!(f.store.entry(stored.id).map(|e| e.status), Some(RecordStatus::Active));
    }

    #[tokio::test]
    async fn test_toggle_skips_validator() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        f.store.set_account_status(f.debit, RecordStatus::Inactive);

        let toggled = JournalEntryService::toggle_status(&f.store, &f.ctx, stored.id).await;
        assert!(toggled.is_ok());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let f = fixture(Some(date(2024, 1, 1)));
        let data = input(&f, date(2024, 3, 1));
        let created = JournalEntryService::create(&f.store, &f.ctx, data.clone())
            .await
            .unwrap();

        let read = JournalEntryService::get(&f.store, &f.ctx, created.id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(JournalEntryInput::from_entry(&read), data);
    }

    #[tokio::test]
    async fn test_other_company_cannot_see_or_mutate() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        let intruder_company = f.store.add_company(None);
        let intruder = RequestContext::for_company(intruder_company, UserId::new());

        assert!(matches!(
            JournalEntryService::get(&f.store, &intruder, stored.id).await,
            Err(JournalError::NotFound { .. })
        ));
        assert!(matches!(
            JournalEntryService::toggle_status(&f.store, &intruder, stored.id).await,
            Err(JournalError::NotFound { .. })
        ));
        let listed = JournalEntryService::list(&f.store, &intruder, EntryFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert!(listed.data.is_empty());
    }

    #[tokio::test]
    async fn test_accounts_of_other_company_do_not_resolve() {
        let f = fixture(None);
        let foreign_company = f.store.add_company(None);
        let foreign = f.store.add_account(foreign_company, 2024, RecordStatus::Active);

        let mut data = input(&f, date(2024, 3, 1));
        data.credit_account_id = foreign;

        let result = JournalEntryService::create(&f.store, &f.ctx, data).await;
        assert!(matches!(
            result,
            Err(JournalError::Validation(ValidationError::AccountNotFound(id))) if id == foreign
        ));
    }

    #[tokio::test]
    async fn test_missing_company_record_is_illegal_state() {
        let f = fixture(None);
        let ghost = RequestContext::for_company(CompanyId::new(), UserId::new());

        let result = JournalEntryService::create(&f.store, &ghost, input(&f, date(2024, 3, 1))).await;
        assert!(matches!(result, Err(JournalError::IllegalState(_))));
        assert_eq!(f.store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_system_context_bypasses_period_lock() {
        let f = fixture(Some(date(2025, 1, 1)));

        let entry = JournalEntryService::create(&f.store, &RequestContext::system(), input(&f, date(2024, 3, 1)))
            .await
            .unwrap();

        assert_eq!(Some(entry.company_id), f.ctx.company_id);
    }

    #[tokio::test]
    async fn test_system_context_rejects_cross_company_accounts() {
        let f = fixture(None);
        let foreign_company = f.store.add_company(None);
        let foreign = f.store.add_account(foreign_company, 2024, RecordStatus::Active);

        let mut data = input(&f, date(2024, 3, 1));
        data.credit_account_id = foreign;

        let result = JournalEntryService::create(&f.store, &RequestContext::system(), data).await;
        assert!(matches!(
            result,
            Err(JournalError::Validation(ValidationError::AccountNotFound(id))) if id == foreign
        ));
    }

    #[tokio::test]
    async fn test_scenario_e_list_excludes_inactive_by_default() {
        let f = fixture(None);
        let kept = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        let hidden = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 2)))
            .await
            .unwrap();
        JournalEntryService::toggle_status(&f.store, &f.ctx, hidden.id)
            .await
            .unwrap();

        let filter = EntryFilter {
            fiscal_year: Some(2024),
            ..EntryFilter::default()
        };
        let page = JournalEntryService::list(&f.store, &f.ctx, filter.clone(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.data.iter().map(|e| e.id).collect::<Vec<_>>(), vec![kept.id]);
        assert_eq!(page.meta.total, 1);

        let all = JournalEntryService::list(
            &f.store,
            &f.ctx,
            EntryFilter {
                include_inactive: true,
                ..filter
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
        assert_eq!(all.meta.total, 2);
    }

    #[tokio::test]
    async fn test_list_ignores_period_lock() {
        let f = fixture(None);
        JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        f.store.set_accounting_period(f.ctx.company_id.unwrap(), Some(date(2030, 1, 1)));

        let page = JournalEntryService::list(&f.store, &f.ctx, EntryFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_list_paginates_in_date_order() {
        let f = fixture(None);
        for day in [5, 1, 3] {
            JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, day)))
                .await
                .unwrap();
        }

        let first = JournalEntryService::list(&f.store, &f.ctx, EntryFilter::default(), PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(
            first.data.iter().map(|e| e.competence_date).collect::<Vec<_>>(),
            vec![date(2024, 3, 1), date(2024, 3, 3)]
        );
        assert_eq!(first.meta.total_pages, 2);

        let second = JournalEntryService::list(&f.store, &f.ctx, EntryFilter::default(), PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(second.data.len(), 1);
        assert_eq!(second.data[0].competence_date, date(2024, 3, 5));
    }

    /// Store that flips an entry's status right before each write, as a
    /// toggle committed by another transaction would.
    struct InterleavedToggle<'a> {
        inner: &'a InMemoryStore,
        concurrent_status: RecordStatus,
    }

    #[async_trait::async_trait]
    impl CompanyLookup for InterleavedToggle<'_> {
        async fn find_company(
            &self,
            id: CompanyId,
        ) -> Result<Option<crate::company::Company>, StoreError> {
            self.inner.find_company(id).await
        }
    }

    #[async_trait::async_trait]
    impl AccountLookup for InterleavedToggle<'_> {
        async fn find_account(&self, id: AccountId) -> Result<Option<ChartOfAccount>, StoreError> {
            self.inner.find_account(id).await
        }
    }

    #[async_trait::async_trait]
    impl JournalEntryStore for InterleavedToggle<'_> {
        async fn find_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, StoreError> {
            self.inner.find_entry(id).await
        }

        async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
            self.inner.insert_entry(entry).await
        }

        async fn update_entry_data(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
            self.inner.set_entry_status(entry.id, self.concurrent_status);
            self.inner.update_entry_data(entry).await
        }

        async fn update_entry_status(
            &self,
            id: JournalEntryId,
            from: RecordStatus,
            to: RecordStatus,
            updated_at: chrono::DateTime<Utc>,
        ) -> Result<JournalEntry, StoreError> {
            self.inner.set_entry_status(id, self.concurrent_status);
            self.inner.update_entry_status(id, from, to, updated_at).await
        }

        async fn list_entries(
            &self,
            filter: &EntryFilter,
            page: PageRequest,
        ) -> Result<PageResponse<JournalEntry>, StoreError> {
            self.inner.list_entries(filter, page).await
        }
    }

    #[tokio::test]
    async fn test_update_keeps_concurrently_written_status() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        let store = InterleavedToggle {
            inner: &f.store,
            concurrent_status: RecordStatus::Inactive,
        };

        let mut changed = input(&f, date(2024, 3, 2));
        changed.description = "Editado".to_string();
        let updated = JournalEntryService::update(&store, &f.ctx, stored.id, changed)
            .await
            .unwrap();

        assert_eq!(updated.status, RecordStatus::Inactive);
        assert_eq!(updated.description, "Editado");
        assert_eq!(f.store.entry(stored.id), Some(updated));
    }

    #[tokio::test]
    async fn test_toggle_after_concurrent_toggle_conflicts() {
        let f = fixture(None);
        let stored = JournalEntryService::create(&f.store, &f.ctx, input(&f, date(2024, 3, 1)))
            .await
            .unwrap();
        let store = InterleavedToggle {
            inner: &f.store,
            concurrent_status: RecordStatus::Inactive,
        };

        let result = JournalEntryService::toggle_status(&store, &f.ctx, stored.id).await;

        assert!(matches!(
            result,
            Err(JournalError::Store(StoreError::Conflict(_)))
        ));
        assert_eq!(
            f.store.entry(stored.id).map(|e| e.status),
            Some(RecordStatus::Inactive)
        );
    }
}
