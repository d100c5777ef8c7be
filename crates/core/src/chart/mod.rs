//! Chart of accounts (plano de contas).
//!
//! Accounts are versioned by fiscal year: the same code may exist once per
//! company and fiscal year. Code and fiscal year never change after creation
//! and accounts are only ever deactivated, never deleted.

pub mod error;
pub mod registry;
pub mod rules;
pub mod types;

pub use error::ChartError;
pub use registry::ChartOfAccountsRegistry;
pub use types::{
    AccountClass, AccountFilter, AccountNature, AccountType, ChartOfAccount, CreateAccountInput,
    UpdateAccountInput,
};
