//! Company repository.
//!
//! Companies are owned outside the ledger core; this repository exists so the
//! seeder and integration tests can create them and move the accounting
//! period.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use tracing::info;

use ecf_core::Company;
use ecf_shared::AppError;
use ecf_shared::types::CompanyId;

use crate::entities::companies;
use crate::store::company_from_model;

/// Error types for company operations.
#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    /// Company not found.
    #[error("Company not found: {0}")]
    NotFound(CompanyId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CompanyError> for AppError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::NotFound(id) => Self::NotFound(format!("Company {id}")),
            CompanyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a company.
#[derive(Debug, Clone)]
pub struct CreateCompanyInput {
    /// Legal name.
    pub name: String,
    /// CNPJ, stored as given.
    pub cnpj: Option<String>,
    /// Initial accounting period.
    pub accounting_period: Option<NaiveDate>,
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: CreateCompanyInput) -> Result<Company, CompanyError> {
        let now = Utc::now().into();
        let model = companies::ActiveModel {
            id: Set(CompanyId::new().into_inner()),
            name: Set(input.name),
            cnpj: Set(input.cnpj),
            accounting_period: Set(input.accounting_period),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(company_from_model(model))
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyError> {
        let model = companies::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(company_from_model))
    }

    /// Finds a company by CNPJ, compared as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Company>, CompanyError> {
        let model = companies::Entity::find()
            .filter(companies::Column::Cnpj.eq(cnpj))
            .one(&self.db)
            .await?;
        Ok(model.map(company_from_model))
    }

    /// Moves the accounting period. `None` removes the lock.
    ///
    /// The new period applies to every guarded operation whose transaction
    /// reads the company after this commits.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyError::NotFound`] if the company does not exist.
    pub async fn set_accounting_period(
        &self,
        id: CompanyId,
        accounting_period: Option<NaiveDate>,
    ) -> Result<Company, CompanyError> {
        let existing = companies::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(CompanyError::NotFound(id))?;

        let mut model = existing.into_active_model();
        model.accounting_period = Set(accounting_period);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&self.db).await?;

        info!(
            company_id = %id,
            accounting_period = ?accounting_period,
            "Accounting period changed"
        );

        Ok(company_from_model(updated))
    }
}
