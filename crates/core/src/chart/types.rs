//! Chart of accounts domain types.

use serde::{Deserialize, Serialize};

use ecf_shared::types::{AccountId, CompanyId, ReferenceAccountId};

use crate::status::RecordStatus;

/// Broad account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Ativo.
    Asset,
    /// Passivo.
    Liability,
    /// Patrimônio líquido.
    Equity,
    /// Receita.
    Revenue,
    /// Despesa.
    Expense,
    /// Custo.
    Cost,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
            Self::Cost => "COST",
        }
    }

    /// Parses the string produced by [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ASSET" => Some(Self::Asset),
            "LIABILITY" => Some(Self::Liability),
            "EQUITY" => Some(Self::Equity),
            "REVENUE" => Some(Self::Revenue),
            "EXPENSE" => Some(Self::Expense),
            "COST" => Some(Self::Cost),
            _ => None,
        }
    }

    /// The nature accounts of this type normally carry.
    #[must_use]
    pub const fn normal_nature(&self) -> AccountNature {
        match self {
            Self::Asset | Self::Expense | Self::Cost => AccountNature::Debit,
            Self::Liability | Self::Equity | Self::Revenue => AccountNature::Credit,
        }
    }
}

/// ECF classification of the account (código de natureza of the J050 record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountClass {
    /// 01 - Contas de ativo.
    Asset,
    /// 02 - Contas de passivo.
    Liability,
    /// 03 - Patrimônio líquido.
    Equity,
    /// 04 - Contas de resultado.
    Result,
    /// 05 - Contas de compensação.
    Memorandum,
    /// 09 - Outras.
    Other,
}

impl AccountClass {
    /// Two-digit code used in the ECF layout.
    #[must_use]
    pub const fn ecf_code(&self) -> &'static str {
        match self {
            Self::Asset => "01",
            Self::Liability => "02",
            Self::Equity => "03",
            Self::Result => "04",
            Self::Memorandum => "05",
            Self::Other => "09",
        }
    }

    /// Parses a two-digit ECF code.
    pub fn from_ecf_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Asset),
            "02" => Some(Self::Liability),
            "03" => Some(Self::Equity),
            "04" => Some(Self::Result),
            "05" => Some(Self::Memorandum),
            "09" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Side on which the account's balance normally sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountNature {
    /// Debit-normal (devedora).
    Debit,
    /// Credit-normal (credora).
    Credit,
}

impl AccountNature {
    /// Single-letter code used in the ECF layout.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "D",
            Self::Credit => "C",
        }
    }

    /// Parses `D` or `C`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "D" => Some(Self::Debit),
            "C" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// An account of the chart for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccount {
    /// Unique identifier.
    pub id: AccountId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Account code, unique per company and fiscal year. Immutable.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Fiscal year this version of the account belongs to. Immutable.
    pub fiscal_year: i32,
    /// Broad account type.
    pub account_type: AccountType,
    /// Linked regulatory reference account.
    pub reference_account_id: ReferenceAccountId,
    /// ECF classification.
    pub classe: AccountClass,
    /// Hierarchy depth, 1 to 5.
    pub level: u8,
    /// Normal balance side.
    pub nature: AccountNature,
    /// Whether postings affect the period result.
    pub affects_result: bool,
    /// Whether expenses in this account are tax-deductible.
    pub deductible: bool,
    /// Active or soft-deleted.
    pub status: RecordStatus,
}

impl ChartOfAccount {
    /// Returns true if the account can receive postings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Fiscal year (>= 2000).
    pub fiscal_year: i32,
    /// Broad account type.
    pub account_type: AccountType,
    /// Linked regulatory reference account.
    pub reference_account_id: ReferenceAccountId,
    /// ECF classification.
    pub classe: AccountClass,
    /// Hierarchy depth, 1 to 5.
    pub level: u8,
    /// Normal balance side.
    pub nature: AccountNature,
    /// Whether postings affect the period result.
    pub affects_result: bool,
    /// Whether expenses are tax-deductible.
    pub deductible: bool,
}

/// Input for updating an account.
///
/// Code and fiscal year are deliberately absent: they are immutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Display name.
    pub name: Option<String>,
    /// Broad account type.
    pub account_type: Option<AccountType>,
    /// Linked regulatory reference account.
    pub reference_account_id: Option<ReferenceAccountId>,
    /// ECF classification.
    pub classe: Option<AccountClass>,
    /// Hierarchy depth.
    pub level: Option<u8>,
    /// Normal balance side.
    pub nature: Option<AccountNature>,
    /// Whether postings affect the period result.
    pub affects_result: Option<bool>,
    /// Whether expenses are tax-deductible.
    pub deductible: Option<bool>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Only accounts of this fiscal year.
    pub fiscal_year: Option<i32>,
    /// Only accounts of this type.
    pub account_type: Option<AccountType>,
    /// Include deactivated accounts.
    pub include_inactive: bool,
}

impl AccountFilter {
    /// Returns true if `account` passes this filter.
    #[must_use]
    pub fn matches(&self, account: &ChartOfAccount) -> bool {
        self.fiscal_year.is_none_or(|year| account.fiscal_year == year)
            && self.account_type.is_none_or(|t| account.account_type == t)
            && (self.include_inactive || account.is_active())
    }
}
