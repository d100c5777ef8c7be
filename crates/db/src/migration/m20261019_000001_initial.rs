//! Initial database migration.
//!
//! Creates companies, the reference plan, the chart of accounts and journal
//! entries. Journal entries and accounts are never deleted, so foreign keys
//! restrict deletes.

use sea_orm_migration::prelude::*;

use ecf_core::journal::{AMOUNT_PRECISION, AMOUNT_SCALE};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(REFERENCE_ACCOUNTS_SQL).await?;
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;
        db.execute_unprepared(&journal_entries_sql()).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    cnpj VARCHAR(18),
    -- earliest competence date still open for mutation; NULL means no lock
    accounting_period DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX idx_companies_cnpj ON companies(cnpj) WHERE cnpj IS NOT NULL;
";

const REFERENCE_ACCOUNTS_SQL: &str = r"
CREATE TABLE reference_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(30) NOT NULL UNIQUE,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE RESTRICT,
    code VARCHAR(30) NOT NULL,
    name VARCHAR(255) NOT NULL,
    fiscal_year INTEGER NOT NULL,
    account_type VARCHAR(16) NOT NULL,
    reference_account_id UUID NOT NULL REFERENCES reference_accounts(id),
    classe CHAR(2) NOT NULL,
    level SMALLINT NOT NULL,
    nature CHAR(1) NOT NULL,
    affects_result BOOLEAN NOT NULL DEFAULT false,
    deductible BOOLEAN NOT NULL DEFAULT false,
    status VARCHAR(8) NOT NULL DEFAULT 'ACTIVE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_chart_of_accounts_code UNIQUE (company_id, fiscal_year, code),
    CONSTRAINT chk_coa_fiscal_year CHECK (fiscal_year >= 2000),
    CONSTRAINT chk_coa_level CHECK (level BETWEEN 1 AND 5),
    CONSTRAINT chk_coa_account_type CHECK (
        account_type IN ('ASSET', 'LIABILITY', 'EQUITY', 'REVENUE', 'EXPENSE', 'COST')
    ),
    CONSTRAINT chk_coa_classe CHECK (classe IN ('01', '02', '03', '04', '05', '09')),
    CONSTRAINT chk_coa_nature CHECK (nature IN ('D', 'C')),
    CONSTRAINT chk_coa_status CHECK (status IN ('ACTIVE', 'INACTIVE'))
);

CREATE INDEX idx_coa_company_year ON chart_of_accounts(company_id, fiscal_year, code);
";

fn journal_entries_sql() -> String {
    format!(
        r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE RESTRICT,
    competence_date DATE NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id) ON DELETE RESTRICT,
    credit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id) ON DELETE RESTRICT,
    amount DECIMAL({AMOUNT_PRECISION}, {AMOUNT_SCALE}) NOT NULL,
    description TEXT NOT NULL,
    fiscal_year INTEGER NOT NULL,
    status VARCHAR(8) NOT NULL DEFAULT 'ACTIVE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_je_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_je_distinct_accounts CHECK (debit_account_id <> credit_account_id),
    CONSTRAINT chk_je_status CHECK (status IN ('ACTIVE', 'INACTIVE'))
);

CREATE INDEX idx_je_company_date ON journal_entries(company_id, competence_date, id);
CREATE INDEX idx_je_debit_account ON journal_entries(debit_account_id);
CREATE INDEX idx_je_credit_account ON journal_entries(credit_account_id);
"
    )
}

const TRIGGERS_SQL: &str = r"
-- journal entries are soft-deleted only
CREATE OR REPLACE FUNCTION prevent_journal_entry_delete()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'journal entries cannot be deleted, deactivate instead';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_journal_entry_delete
    BEFORE DELETE ON journal_entries
    FOR EACH ROW EXECUTE FUNCTION prevent_journal_entry_delete();

-- code and fiscal year are immutable once an account exists
CREATE OR REPLACE FUNCTION prevent_account_key_change()
RETURNS TRIGGER AS $$
BEGIN
    IF NEW.code <> OLD.code OR NEW.fiscal_year <> OLD.fiscal_year THEN
        RAISE EXCEPTION 'account code and fiscal year are immutable';
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_account_key_change
    BEFORE UPDATE ON chart_of_accounts
    FOR EACH ROW EXECUTE FUNCTION prevent_account_key_change();
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS chart_of_accounts CASCADE;
DROP TABLE IF EXISTS reference_accounts CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP FUNCTION IF EXISTS prevent_journal_entry_delete();
DROP FUNCTION IF EXISTS prevent_account_key_change();
";
