//! `SeaORM` Entity for journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub competence_date: Date,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub fiscal_year: i32,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    DebitAccount,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    CreditAccount,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
