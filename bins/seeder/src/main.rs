//! Demo data seeder for the ECF ledger.
//!
//! Seeds reference accounts, a demo company, its 2024 chart of accounts and a
//! handful of journal entries. Every step is skipped when its data already
//! exists, so the seeder can be run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecf_core::RequestContext;
use ecf_core::chart::{
    AccountClass, AccountFilter, AccountType, ChartError, ChartOfAccount, CreateAccountInput,
};
use ecf_core::journal::{EntryFilter, JournalEntryInput};
use ecf_db::repositories::CreateCompanyInput;
use ecf_db::{AccountRepository, CompanyRepository, JournalEntryRepository, ReferenceAccountRepository};
use ecf_shared::AppConfig;
use ecf_shared::config::LoggingConfig;
use ecf_shared::types::{CompanyId, PageRequest, ReferenceAccountId, UserId};

/// CNPJ of the demo company.
const DEMO_CNPJ: &str = "12.345.678/0001-95";

const FISCAL_YEAR: i32 = 2024;

/// Plano referencial rows used by the demo chart.
const REFERENCE_ACCOUNTS: &[(&str, &str)] = &[
    ("1.01.01.01.01", "Caixa"),
    ("1.01.01.02.01", "Bancos conta movimento"),
    ("2.01.01.01.01", "Fornecedores"),
    ("2.03.01.01.01", "Capital social"),
    ("3.01.01.01.01", "Receita da venda de mercadorias"),
    ("3.11.01.01.01", "Despesas administrativas"),
];

struct AccountSeed {
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    classe: AccountClass,
    reference: &'static str,
}

const ACCOUNTS: &[AccountSeed] = &[
    AccountSeed {
        code: "1.1.01.001",
        name: "Caixa geral",
        account_type: AccountType::Asset,
        classe: AccountClass::Asset,
        reference: "1.01.01.01.01",
    },
    AccountSeed {
        code: "1.1.01.002",
        name: "Banco do Brasil c/c",
        account_type: AccountType::Asset,
        classe: AccountClass::Asset,
        reference: "1.01.01.02.01",
    },
    AccountSeed {
        code: "2.1.01.001",
        name: "Fornecedores nacionais",
        account_type: AccountType::Liability,
        classe: AccountClass::Liability,
        reference: "2.01.01.01.01",
    },
    AccountSeed {
        code: "2.4.01.001",
        name: "Capital subscrito",
        account_type: AccountType::Equity,
        classe: AccountClass::Equity,
        reference: "2.03.01.01.01",
    },
    AccountSeed {
        code: "3.1.01.001",
        name: "Vendas de mercadorias",
        account_type: AccountType::Revenue,
        classe: AccountClass::Result,
        reference: "3.01.01.01.01",
    },
    AccountSeed {
        code: "4.1.01.001",
        name: "Material de escritório",
        account_type: AccountType::Expense,
        classe: AccountClass::Result,
        reference: "3.11.01.01.01",
    },
];

/// (competence date, debit code, credit code, amount in cents, description)
const ENTRIES: &[((i32, u32, u32), &str, &str, i64, &str)] = &[
    ((2024, 1, 2), "1.1.01.002", "2.4.01.001", 10_000_000, "Integralização de capital"),
    ((2024, 1, 15), "1.1.01.001", "3.1.01.001", 450_000, "Venda a vista"),
    ((2024, 2, 5), "4.1.01.001", "2.1.01.001", 38_990, "Compra de material de escritório"),
    ((2024, 2, 20), "2.1.01.001", "1.1.01.002", 38_990, "Pagamento a fornecedor"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = ecf_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    info!("Seeding reference accounts");
    seed_reference_accounts(&ReferenceAccountRepository::new(db.clone())).await?;

    info!("Seeding demo company");
    let companies = CompanyRepository::new(db.clone());
    let company = match companies.find_by_cnpj(DEMO_CNPJ).await? {
        Some(company) => {
            info!(company_id = %company.id, "Demo company already exists");
            company
        }
        None => {
            companies
                .create(CreateCompanyInput {
                    name: "Comércio Exemplo Ltda".to_string(),
                    cnpj: Some(DEMO_CNPJ.to_string()),
                    accounting_period: Some(date(FISCAL_YEAR, 1, 1)?),
                })
                .await?
        }
    };

    info!("Seeding chart of accounts");
    let chart = seed_chart(
        &AccountRepository::new(db.clone()),
        &ReferenceAccountRepository::new(db.clone()),
        company.id,
    )
    .await?;

    info!("Seeding journal entries");
    let ctx = RequestContext::for_company(company.id, UserId::new());
    seed_entries(&JournalEntryRepository::new(db), &ctx, &chart).await?;

    info!("Seeding complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

async fn seed_reference_accounts(repo: &ReferenceAccountRepository) -> anyhow::Result<()> {
    for &(code, description) in REFERENCE_ACCOUNTS {
        if repo.find_by_code(code).await?.is_some() {
            continue;
        }
        repo.create(code, description).await?;
        info!(code, "Reference account created");
    }
    Ok(())
}

async fn seed_chart(
    accounts: &AccountRepository,
    references: &ReferenceAccountRepository,
    company_id: CompanyId,
) -> anyhow::Result<Vec<ChartOfAccount>> {
    for seed in ACCOUNTS {
        let reference = references
            .find_by_code(seed.reference)
            .await?
            .with_context(|| format!("reference account {} missing", seed.reference))?;

        let input = CreateAccountInput {
            code: seed.code.to_string(),
            name: seed.name.to_string(),
            fiscal_year: FISCAL_YEAR,
            account_type: seed.account_type,
            reference_account_id: ReferenceAccountId::from_uuid(reference.id),
            classe: seed.classe,
            level: 4,
            nature: seed.account_type.normal_nature(),
            affects_result: matches!(seed.classe, AccountClass::Result),
            deductible: matches!(seed.account_type, AccountType::Expense),
        };

        match accounts.create(company_id, input).await {
            Ok(account) => info!(code = %account.code, "Account created"),
            Err(ChartError::DuplicateCode { code, .. }) => {
                info!(code = %code, "Account already exists");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let filter = AccountFilter {
        fiscal_year: Some(FISCAL_YEAR),
        ..AccountFilter::default()
    };
    Ok(accounts.list(company_id, &filter).await?)
}

async fn seed_entries(
    repo: &JournalEntryRepository,
    ctx: &RequestContext,
    chart: &[ChartOfAccount],
) -> anyhow::Result<()> {
    let existing = repo
        .list(ctx, EntryFilter::default(), PageRequest::new(1, 1))
        .await?;
    if existing.meta.total > 0 {
        info!(count = existing.meta.total, "Journal entries already exist, skipping");
        return Ok(());
    }

    let find = |code: &str| {
        chart
            .iter()
            .find(|account| account.code == code)
            .map(|account| account.id)
            .with_context(|| format!("account {code} missing from chart"))
    };

    for &((year, month, day), debit, credit, cents, description) in ENTRIES {
        let entry = repo
            .create(
                ctx,
                JournalEntryInput {
                    competence_date: date(year, month, day)?,
                    debit_account_id: find(debit)?,
                    credit_account_id: find(credit)?,
                    amount: Decimal::new(cents, 2),
                    description: description.to_string(),
                    fiscal_year: FISCAL_YEAR,
                },
            )
            .await?;
        info!(entry_id = %entry.id, description, "Journal entry created");
    }

    Ok(())
}
