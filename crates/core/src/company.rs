//! Company record as seen by the core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ecf_shared::types::CompanyId;

/// A tenant company.
///
/// Only a dedicated company-settings operation (outside this crate) changes
/// `accounting_period`; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier.
    pub id: CompanyId,
    /// Legal name.
    pub name: String,
    /// CNPJ as stored, unformatted and unvalidated.
    pub cnpj: Option<String>,
    /// Período contábil: earliest competence date open for mutation.
    /// `None` when the company has not locked any period yet.
    pub accounting_period: Option<NaiveDate>,
}
