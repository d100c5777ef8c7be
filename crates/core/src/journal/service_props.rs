//! Property-based tests for the journal entry lifecycle.

use proptest::prelude::*;
use rust_decimal::Decimal;

use ecf_shared::types::UserId;

use super::error::{JournalError, ValidationError};
use super::service::JournalEntryService;
use super::types::JournalEntryInput;
use crate::context::RequestContext;
use crate::status::RecordStatus;
use crate::testing::{InMemoryStore, date};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// *For any* competence date and period, create succeeds exactly when the
    /// date is on or after the period, and nothing is stored otherwise.
    #[test]
    fn prop_create_respects_period(
        competence_day in 0u32..365,
        period_day in 0u32..365,
        amount in positive_amount(),
    ) {
        let competence = date(2024, 1, 1) + chrono::Days::new(u64::from(competence_day));
        let period = date(2024, 1, 1) + chrono::Days::new(u64::from(period_day));

        let store = InMemoryStore::new();
        let company = store.add_company(Some(period));
        let debit = store.add_account(company, 2024, RecordStatus::Active);
        let credit = store.add_account(company, 2024, RecordStatus::Active);
        let ctx = RequestContext::for_company(company, UserId::new());

        let input = JournalEntryInput {
            competence_date: competence,
            debit_account_id: debit,
            credit_account_id: credit,
            amount,
            description: "Lançamento".to_string(),
            fiscal_year: 2024,
        };

        let result = block_on(JournalEntryService::create(&store, &ctx, input));

        if competence >= period {
            prop_assert!(result.is_ok());
            prop_assert_eq!(store.entry_count(), 1);
        } else {
            let is_lock_violation = matches!(result, Err(JournalError::PeriodLockViolation { .. }));
            prop_assert!(is_lock_violation);
            prop_assert_eq!(store.entry_count(), 0);
        }
    }

    /// *For any* non-positive amount, create fails with `InvalidAmount` and
    /// stores nothing.
    #[test]
    fn prop_non_positive_amount_never_stored(cents in 0i64..100_000_000i64) {
        let store = InMemoryStore::new();
        let company = store.add_company(None);
        let debit = store.add_account(company, 2024, RecordStatus::Active);
        let credit = store.add_account(company, 2024, RecordStatus::Active);
        let ctx = RequestContext::for_company(company, UserId::new());

        let input = JournalEntryInput {
            competence_date: date(2024, 5, 1),
            debit_account_id: debit,
            credit_account_id: credit,
            amount: Decimal::new(-cents, 2),
            description: "Estorno".to_string(),
            fiscal_year: 2024,
        };

        let result = block_on(JournalEntryService::create(&store, &ctx, input));

        let is_invalid_amount = matches!(
            result,
            Err(JournalError::Validation(ValidationError::InvalidAmount(_)))
        );
        prop_assert!(is_invalid_amount);
        prop_assert_eq!(store.entry_count(), 0);
    }

    /// *For any* stored entry, toggling twice restores its status and data.
    #[test]
    fn prop_toggle_twice_is_identity(amount in positive_amount(), start_inactive in any::<bool>()) {
        let store = InMemoryStore::new();
        let company = store.add_company(None);
        let debit = store.add_account(company, 2024, RecordStatus::Active);
        let credit = store.add_account(company, 2024, RecordStatus::Active);
        let ctx = RequestContext::for_company(company, UserId::new());

        let input = JournalEntryInput {
            competence_date: date(2024, 5, 1),
            debit_account_id: debit,
            credit_account_id: credit,
            amount,
            description: "Provisão".to_string(),
            fiscal_year: 2024,
        };

        let (before, after) = block_on(async {
            let created = JournalEntryService::create(&store, &ctx, input).await.unwrap();
            let before = if start_inactive {
                JournalEntryService::toggle_status(&store, &ctx, created.id).await.unwrap()
            } else {
                created
            };
            JournalEntryService::toggle_status(&store, &ctx, before.id).await.unwrap();
            let after = JournalEntryService::toggle_status(&store, &ctx, before.id).await.unwrap();
            (before, after)
        });

        prop_assert_eq!(after.status, before.status);
        prop_assert_eq!(JournalEntryInput::from_entry(&after), JournalEntryInput::from_entry(&before));
        prop_assert_eq!(after.created_at, before.created_at);
    }
}
