//! `SeaORM` implementation of the core store ports.
//!
//! [`SeaOrmStore`] borrows any connection: the pool for reads, or a
//! [`DatabaseTransaction`] for mutations so that the company read, the
//! account reads and the write all happen in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use tracing::warn;

use ecf_core::chart::{AccountClass, AccountFilter, AccountNature, AccountType, ChartOfAccount};
use ecf_core::journal::{EntryFilter, JournalEntry};
use ecf_core::ports::{
    AccountLookup, ChartStore, CompanyLookup, JournalEntryStore, ReferenceAccountLookup,
    StoreError,
};
use ecf_core::{Company, RecordStatus};
use ecf_shared::types::{
    AccountId, CompanyId, JournalEntryId, PageRequest, PageResponse, ReferenceAccountId,
};

use crate::entities::{chart_of_accounts, companies, journal_entries, reference_accounts};

/// Maps a database error onto the port error.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::DuplicateKey(detail),
        _ => StoreError::Database(err.to_string()),
    }
}

/// Commits `txn` if `result` is `Ok`, rolls it back otherwise.
pub(crate) async fn finish<T, E>(txn: DatabaseTransaction, result: Result<T, E>) -> Result<T, E>
where
    E: From<StoreError>,
{
    match result {
        Ok(value) => {
            txn.commit().await.map_err(store_error)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                warn!(error = %rollback, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

/// Store over a borrowed `SeaORM` connection.
pub struct SeaOrmStore<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmStore<'a, C> {
    /// Creates a store over `conn`.
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

fn corrupt(table: &str, column: &str, value: &str) -> StoreError {
    StoreError::Database(format!("invalid {column} '{value}' in {table}"))
}

fn parse_status(table: &str, value: &str) -> Result<RecordStatus, StoreError> {
    RecordStatus::parse(value).ok_or_else(|| corrupt(table, "status", value))
}

pub(crate) fn company_from_model(model: companies::Model) -> Company {
    Company {
        id: CompanyId::from_uuid(model.id),
        name: model.name,
        cnpj: model.cnpj,
        accounting_period: model.accounting_period,
    }
}

fn account_from_model(model: chart_of_accounts::Model) -> Result<ChartOfAccount, StoreError> {
    const TABLE: &str = "chart_of_accounts";

    Ok(ChartOfAccount {
        id: AccountId::from_uuid(model.id),
        company_id: CompanyId::from_uuid(model.company_id),
        account_type: AccountType::parse(&model.account_type)
            .ok_or_else(|| corrupt(TABLE, "account_type", &model.account_type))?,
        reference_account_id: ReferenceAccountId::from_uuid(model.reference_account_id),
        classe: AccountClass::from_ecf_code(&model.classe)
            .ok_or_else(|| corrupt(TABLE, "classe", &model.classe))?,
        level: u8::try_from(model.level)
            .map_err(|_| corrupt(TABLE, "level", &model.level.to_string()))?,
        nature: AccountNature::parse(&model.nature)
            .ok_or_else(|| corrupt(TABLE, "nature", &model.nature))?,
        status: parse_status(TABLE, &model.status)?,
        code: model.code,
        name: model.name,
        fiscal_year: model.fiscal_year,
        affects_result: model.affects_result,
        deductible: model.deductible,
    })
}

fn account_active_model(account: &ChartOfAccount) -> chart_of_accounts::ActiveModel {
    chart_of_accounts::ActiveModel {
        id: Set(account.id.into_inner()),
        company_id: Set(account.company_id.into_inner()),
        code: Set(account.code.clone()),
        name: Set(account.name.clone()),
        fiscal_year: Set(account.fiscal_year),
        account_type: Set(account.account_type.as_str().to_string()),
        reference_account_id: Set(account.reference_account_id.into_inner()),
        classe: Set(account.classe.ecf_code().to_string()),
        level: Set(i16::from(account.level)),
        nature: Set(account.nature.as_str().to_string()),
        affects_result: Set(account.affects_result),
        deductible: Set(account.deductible),
        status: Set(account.status.as_str().to_string()),
        created_at: NotSet,
        updated_at: Set(Utc::now().into()),
    }
}

fn entry_from_model(model: journal_entries::Model) -> Result<JournalEntry, StoreError> {
    Ok(JournalEntry {
        id: JournalEntryId::from_uuid(model.id),
        company_id: CompanyId::from_uuid(model.company_id),
        competence_date: model.competence_date,
        debit_account_id: AccountId::from_uuid(model.debit_account_id),
        credit_account_id: AccountId::from_uuid(model.credit_account_id),
        amount: model.amount,
        description: model.description,
        fiscal_year: model.fiscal_year,
        status: parse_status("journal_entries", &model.status)?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn entry_active_model(entry: &JournalEntry) -> journal_entries::ActiveModel {
    journal_entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        company_id: Set(entry.company_id.into_inner()),
        competence_date: Set(entry.competence_date),
        debit_account_id: Set(entry.debit_account_id.into_inner()),
        credit_account_id: Set(entry.credit_account_id.into_inner()),
        amount: Set(entry.amount),
        description: Set(entry.description.clone()),
        fiscal_year: Set(entry.fiscal_year),
        status: Set(entry.status.as_str().to_string()),
        created_at: Set(entry.created_at.into()),
        updated_at: Set(entry.updated_at.into()),
    }
}

#[async_trait]
impl<C: ConnectionTrait> CompanyLookup for SeaOrmStore<'_, C> {
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let company = companies::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map_err(store_error)?;
        Ok(company.map(company_from_model))
    }
}

#[async_trait]
impl<C: ConnectionTrait> AccountLookup for SeaOrmStore<'_, C> {
    async fn find_account(&self, id: AccountId) -> Result<Option<ChartOfAccount>, StoreError> {
        chart_of_accounts::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map_err(store_error)?
            .map(account_from_model)
            .transpose()
    }
}

#[async_trait]
impl<C: ConnectionTrait> ReferenceAccountLookup for SeaOrmStore<'_, C> {
    async fn reference_account_exists(&self, id: ReferenceAccountId) -> Result<bool, StoreError> {
        let count = reference_accounts::Entity::find_by_id(id.into_inner())
            .count(self.conn)
            .await
            .map_err(store_error)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl<C: ConnectionTrait> ChartStore for SeaOrmStore<'_, C> {
    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        fiscal_year: i32,
        code: &str,
    ) -> Result<Option<ChartOfAccount>, StoreError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(company_id.into_inner()))
            .filter(chart_of_accounts::Column::FiscalYear.eq(fiscal_year))
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(self.conn)
            .await
            .map_err(store_error)?
            .map(account_from_model)
            .transpose()
    }

    async fn save_account(&self, account: ChartOfAccount) -> Result<ChartOfAccount, StoreError> {
        let exists = chart_of_accounts::Entity::find_by_id(account.id.into_inner())
            .count(self.conn)
            .await
            .map_err(store_error)?
            > 0;

        let mut model = account_active_model(&account);
        let saved = if exists {
            model.id = Unchanged(account.id.into_inner());
            model.update(self.conn).await
        } else {
            model.insert(self.conn).await
        }
        .map_err(store_error)?;

        account_from_model(saved)
    }

    async fn list_accounts(
        &self,
        company_id: CompanyId,
        filter: &AccountFilter,
    ) -> Result<Vec<ChartOfAccount>, StoreError> {
        let mut query = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(company_id.into_inner()));

        if let Some(fiscal_year) = filter.fiscal_year {
            query = query.filter(chart_of_accounts::Column::FiscalYear.eq(fiscal_year));
        }
        if let Some(account_type) = filter.account_type {
            query = query.filter(chart_of_accounts::Column::AccountType.eq(account_type.as_str()));
        }
        if !filter.include_inactive {
            query = query.filter(
                chart_of_accounts::Column::Status.eq(RecordStatus::Active.as_str()),
            );
        }

        query
            .order_by_asc(chart_of_accounts::Column::FiscalYear)
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(self.conn)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(account_from_model)
            .collect()
    }
}

#[async_trait]
impl<C: ConnectionTrait> JournalEntryStore for SeaOrmStore<'_, C> {
    async fn find_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, StoreError> {
        journal_entries::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map_err(store_error)?
            .map(entry_from_model)
            .transpose()
    }

    async fn insert_entry(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        let saved = entry_active_model(&entry)
            .insert(self.conn)
            .await
            .map_err(store_error)?;
        entry_from_model(saved)
    }

    async fn update_entry_data(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        let model = journal_entries::ActiveModel {
            id: Unchanged(entry.id.into_inner()),
            company_id: NotSet,
            status: NotSet,
            created_at: NotSet,
            ..entry_active_model(&entry)
        };
        let saved = model.update(self.conn).await.map_err(store_error)?;
        entry_from_model(saved)
    }

    async fn update_entry_status(
        &self,
        id: JournalEntryId,
        from: RecordStatus,
        to: RecordStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<JournalEntry, StoreError> {
        let result = journal_entries::Entity::update_many()
            .col_expr(journal_entries::Column::Status, Expr::value(to.as_str()))
            .col_expr(journal_entries::Column::UpdatedAt, Expr::value(updated_at))
            .filter(journal_entries::Column::Id.eq(id.into_inner()))
            .filter(journal_entries::Column::Status.eq(from.as_str()))
            .exec(self.conn)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(StoreError::Conflict(format!(
                "journal entry {id} is no longer {from}"
            )));
        }

        self.find_entry(id)
            .await?
            .ok_or_else(|| StoreError::Database(format!("journal entry {id} vanished")))
    }

    async fn list_entries(
        &self,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, StoreError> {
        use journal_entries::Column;

        let mut query = journal_entries::Entity::find();

        if let Some(company_id) = filter.company_id {
            query = query.filter(Column::CompanyId.eq(company_id.into_inner()));
        }
        if let Some(account_id) = filter.debit_account_id {
            query = query.filter(Column::DebitAccountId.eq(account_id.into_inner()));
        }
        if let Some(account_id) = filter.credit_account_id {
            query = query.filter(Column::CreditAccountId.eq(account_id.into_inner()));
        }
        if let Some(date) = filter.date {
            query = query.filter(Column::CompetenceDate.eq(date));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(Column::CompetenceDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(Column::CompetenceDate.lte(date_to));
        }
        if let Some(fiscal_year) = filter.fiscal_year {
            query = query.filter(Column::FiscalYear.eq(fiscal_year));
        }
        if !filter.include_inactive {
            query = query.filter(Column::Status.eq(RecordStatus::Active.as_str()));
        }

        let total = query.clone().count(self.conn).await.map_err(store_error)?;

        let entries = query
            .order_by_asc(Column::CompetenceDate)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.conn)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(entry_from_model)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }
}
