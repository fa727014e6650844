//! Ledgerline command-line entry point.
//!
//! Loads a JSON snapshot into the in-memory store, runs one engine operation
//! and prints the result as JSON on stdout. Logs go to stderr.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ledgerline_service::ReportEngine;
use ledgerline_shared::{AppConfig, AppError, LoggingConfig};
use ledgerline_store::{MemoryStore, Snapshot};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, Register};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let snapshot = match &args.snapshot {
        Some(path) => load_snapshot(path)?,
        None => Snapshot::default(),
    };
    let store = Arc::new(MemoryStore::from_snapshot(snapshot));
    let engine = ReportEngine::new(Arc::clone(&store), config.engine.clone());

    let writes = args.command.writes();
    let output = run(&engine, args.command).await.map_err(|e| {
        error!(error = %e, code = e.error_code(), "Operation failed");
        anyhow!("{} [{}]", e, e.error_code())
    })?;
    println!("{output}");

    if writes && args.write_back {
        let path = args
            .snapshot
            .as_deref()
            .context("--write-back needs --snapshot")?;
        save_snapshot(path, &store.snapshot().await)?;
        info!(path = %path.display(), "Snapshot written back");
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    info!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "Snapshot loaded"
    );
    Ok(snapshot)
}

fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json().context("Failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

async fn run(engine: &ReportEngine<MemoryStore>, command: Command) -> Result<String, AppError> {
    match command {
        Command::GeneralLedger(args) => to_json(&engine.general_ledger(&args.into()).await?),
        Command::Journal(args) => to_json(&engine.journal(&args.into()).await?),
        Command::TrialBalance(args) => to_json(&engine.trial_balance(&args.into()).await?),
        Command::BalanceSheet(args) => to_json(&engine.balance_sheet(&args.into()).await?),
        Command::ProfitAndLoss(args) => to_json(&engine.profit_and_loss(&args.into()).await?),
        Command::CashFlow(args) => to_json(&engine.cash_flow(&args.into()).await?),
        Command::FinancialSummary(args) => {
            to_json(&engine.financial_summary(&args.into()).await?)
        }
        Command::AssetPerformance(args) => {
            to_json(&engine.asset_performance(&args.into()).await?)
        }
        Command::Dashboard => to_json(&engine.dashboard_metrics().await?),
        Command::RecentActivity(args) => to_json(&engine.recent_activity(args.limit).await?),
        Command::CashBook(args) => to_json(&engine.cash_book(&args.into()).await?),
        Command::BankBook(args) => to_json(&engine.bank_book(&args.into()).await?),
        Command::Cheques(args) => {
            let (register, query) = args.into_query();
            match register {
                Register::Issued => to_json(&engine.issued_cheques(&query).await?),
                Register::Received => to_json(&engine.received_cheques(&query).await?),
            }
        }
        Command::Reconcile(args) => to_json(&engine.reconcile(args.into()).await?),
        Command::RecordMovement(args) => to_json(&engine.record_movement(args.into()).await?),
        Command::Inventory(args) => match args.movement_filter() {
            Some(filter) => to_json(&engine.movements(&filter).await?),
            None => to_json(&engine.inventory_items().await?),
        },
        Command::Settings => to_json(&engine.settings().await?),
        Command::SaveSettings(args) => to_json(&engine.save_settings(args.into()).await?),
    }
}
