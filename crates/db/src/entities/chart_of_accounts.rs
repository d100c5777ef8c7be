//! `SeaORM` Entity for chart_of_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub code: String,
    pub name: String,
    pub fiscal_year: i32,
    pub account_type: String,
    pub reference_account_id: Uuid,
    pub classe: String,
    pub level: i16,
    pub nature: String,
    pub affects_result: bool,
    pub deductible: bool,
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
        belongs_to = "super::reference_accounts::Entity",
        from = "Column::ReferenceAccountId",
        to = "super::reference_accounts::Column::Id"
    )]
    ReferenceAccounts,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::reference_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferenceAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
