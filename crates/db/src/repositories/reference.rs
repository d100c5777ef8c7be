//! Reference plan (plano referencial) repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use ecf_shared::types::ReferenceAccountId;

use crate::entities::reference_accounts;

/// Repository for the regulatory reference accounts.
#[derive(Debug, Clone)]
pub struct ReferenceAccountRepository {
    db: DatabaseConnection,
}

impl ReferenceAccountRepository {
    /// Creates a new reference account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a reference account.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a duplicate code.
    pub async fn create(
        &self,
        code: &str,
        description: &str,
    ) -> Result<reference_accounts::Model, DbErr> {
        reference_accounts::ActiveModel {
            id: Set(ReferenceAccountId::new().into_inner()),
            code: Set(code.to_string()),
            description: Set(description.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a reference account by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<reference_accounts::Model>, DbErr> {
        reference_accounts::Entity::find()
            .filter(reference_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await
    }

    /// Lists all reference accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<reference_accounts::Model>, DbErr> {
        reference_accounts::Entity::find()
            .order_by_asc(reference_accounts::Column::Code)
            .all(&self.db)
            .await
    }
}
