//! Property-based tests for journal entry validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use ecf_shared::types::{AccountId, CompanyId};

use super::error::ValidationError;
use super::types::JournalEntryInput;
use super::validator::validate;
use crate::status::RecordStatus;
use crate::testing::{account, date};

/// Strategy to generate any amount, including zero and negatives.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-positive amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn status_strategy() -> impl Strategy<Value = RecordStatus> {
    prop_oneof![Just(RecordStatus::Active), Just(RecordStatus::Inactive)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* entry whose debit and credit accounts are equal, validation
    /// fails with `SameAccount` regardless of the other fields.
    #[test]
    fn prop_same_account_always_rejected(
        amount in any_amount(),
        fiscal_year in 2000i32..2100,
        status in status_strategy(),
        account_year in 2000i32..2100,
        resolved in any::<bool>(),
    ) {
        let acct = account(CompanyId::new(), account_year, status);
        let entry = JournalEntryInput {
            competence_date: date(2024, 1, 1),
            debit_account_id: acct.id,
            credit_account_id: acct.id,
            amount,
            description: String::new(),
            fiscal_year,
        };
        let resolved = resolved.then_some(&acct);

        prop_assert_eq!(
            validate(&entry, resolved, resolved),
            Err(ValidationError::SameAccount(acct.id))
        );
    }

    /// *For any* entry with distinct accounts and amount <= 0, validation
    /// fails with `InvalidAmount`.
    #[test]
    fn prop_non_positive_amount_rejected(
        amount in non_positive_amount(),
        fiscal_year in 2000i32..2100,
    ) {
        let entry = JournalEntryInput {
            competence_date: date(2024, 1, 1),
            debit_account_id: AccountId::new(),
            credit_account_id: AccountId::new(),
            amount,
            description: String::new(),
            fiscal_year,
        };

        prop_assert_eq!(validate(&entry, None, None), Err(ValidationError::InvalidAmount(amount)));
    }

    /// *For any* positive amount and matching active accounts, validation passes.
    #[test]
    fn prop_well_formed_entry_accepted(
        cents in 1i64..100_000_000i64,
        fiscal_year in 2000i32..2100,
    ) {
        let company = CompanyId::new();
        let debit = account(company, fiscal_year, RecordStatus::Active);
        let credit = account(company, fiscal_year, RecordStatus::Active);
        let entry = JournalEntryInput {
            competence_date: date(2024, 1, 1),
            debit_account_id: debit.id,
            credit_account_id: credit.id,
            amount: Decimal::new(cents, 2),
            description: String::new(),
            fiscal_year,
        };

        prop_assert!(validate(&entry, Some(&debit), Some(&credit)).is_ok());
    }
}
