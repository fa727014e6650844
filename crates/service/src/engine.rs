//! The report engine.
//!
//! Every operation follows the same shape: validate parameters, fetch the
//! record sets it needs through the [`LedgerSource`] (independent fetches run
//! in parallel, each under the configured timeout), run the pure computation
//! from `ledgerline_core`, and hand any emitted command to the [`LedgerSink`].

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use ledgerline_core::books::{Book, BookService};
use ledgerline_core::cheques::{IssuedCheque, ReceivedCheque};
use ledgerline_core::inventory::{InventoryItem, InventoryMovement, InventoryService, MovementRequest};
use ledgerline_core::ledger::{JournalLine, JournalService, LedgerLine, Transaction};
use ledgerline_core::reconciliation::{ReconciliationReport, ReconciliationService};
use ledgerline_core::reports::{
    AssetPerformanceReport, BalanceSheetReport, CashFlowReport, DashboardMetrics,
    FinancialSummary, IncomeService, MetricsService, ProfitLossReport, ReportService,
    TrialBalanceReport,
};
use ledgerline_core::settings::{OrganizationSettings, SettingsUpdate};
use ledgerline_shared::{AppError, AppResult, EngineConfig};
use ledgerline_store::{
    AccountFilter, AssetFilter, ChequeFilter, LedgerSink, LedgerSource, MovementFilter,
    StoreError, TransactionFilter,
};
use tracing::{error, info, instrument, warn};

use crate::query::{
    AsOfQuery, AssetPerformanceQuery, BookQuery, ChequeQuery, LedgerQuery, PeriodQuery,
    ReconciliationQuery,
};

/// Parameter-keyed report operations over a record store.
#[derive(Debug)]
pub struct ReportEngine<S> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S> Clone for ReportEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S> ReportEngine<S>
where
    S: LedgerSource + LedgerSink,
{
    /// Creates an engine over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Boundary helpers
    // ========================================================================

    /// Awaits one fetch under the configured timeout.
    async fn fetch<T, F>(&self, what: &'static str, query: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.fetch_timeout(), query).await {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => {
                error!(error = %e, source = what, "Failed to fetch records");
                Err(e.into())
            }
            Err(_) => {
                error!(
                    source = what,
                    timeout_ms = self.config.fetch_timeout_ms,
                    "Fetch timed out"
                );
                Err(AppError::Timeout(format!(
                    "{what} did not respond within {} ms",
                    self.config.fetch_timeout_ms
                )))
            }
        }
    }

    /// Awaits one command. Commands are not raced against the timeout: an
    /// abandoned command may still land.
    async fn apply<T, F>(&self, what: &'static str, command: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        command.await.map_err(|e| {
            match &e {
                StoreError::PartiallyApplied(_) => {
                    error!(error = %e, command = what, "Command partially applied; records need repair");
                }
                StoreError::NotFound { .. } => {
                    warn!(error = %e, command = what, "Command target not found");
                }
                _ => error!(error = %e, command = what, "Failed to apply command"),
            }
            e.into()
        })
    }

    // ========================================================================
    // Ledger
    // ========================================================================

    /// Per-account ledger with chronological running balances.
    #[instrument(skip(self))]
    pub async fn general_ledger(&self, query: &LedgerQuery) -> AppResult<Vec<LedgerLine>> {
        let filter = query.filter()?;
        let accounts_filter = AccountFilter::default();
        let (transactions, accounts) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
        )?;

        let lines = JournalService::general_ledger(transactions, &accounts);
        info!(entries = lines.len(), "General ledger generated");
        Ok(lines)
    }

    /// Journal entries with debit/credit columns, newest first.
    #[instrument(skip(self))]
    pub async fn journal(&self, query: &LedgerQuery) -> AppResult<Vec<JournalLine>> {
        let filter = query.filter()?;
        let accounts_filter = AccountFilter::default();
        let (transactions, accounts) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
        )?;

        let lines = JournalService::journal(transactions, &accounts);
        info!(entries = lines.len(), "Journal generated");
        Ok(lines)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Trial balance over active accounts.
    #[instrument(skip(self))]
    pub async fn trial_balance(&self, query: &AsOfQuery) -> AppResult<TrialBalanceReport> {
        let accounts = self
            .fetch("accounts", self.store.accounts(&AccountFilter::active()))
            .await?;

        let as_of = query.date.unwrap_or_else(|| Utc::now().date_naive());
        let report = ReportService::generate_trial_balance(&accounts, Some(as_of))?;
        if report.is_balanced {
            info!(accounts = report.accounts.len(), "Trial balance generated");
        } else {
            warn!(difference = %report.difference, "Trial balance is out of balance");
        }
        Ok(report)
    }

    /// Classified balance sheet over active accounts and active fixed assets.
    #[instrument(skip(self))]
    pub async fn balance_sheet(&self, query: &AsOfQuery) -> AppResult<BalanceSheetReport> {
        let accounts_filter = AccountFilter::active();
        let asset_filter = AssetFilter::active();
        let (accounts, assets) = tokio::try_join!(
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
            self.fetch("fixed assets", self.store.fixed_assets(&asset_filter)),
        )?;

        let as_of = query.date.unwrap_or_else(|| Utc::now().date_naive());
        let report = ReportService::generate_balance_sheet(&accounts, &assets, Some(as_of))?;
        if report.is_balanced {
            info!(total_assets = %report.assets.totals.total, "Balance sheet generated");
        } else {
            warn!(difference = %report.difference, "Balance sheet does not balance");
        }
        Ok(report)
    }

    /// Profit & loss for a period.
    #[instrument(skip(self))]
    pub async fn profit_and_loss(&self, query: &PeriodQuery) -> AppResult<ProfitLossReport> {
        let period = query.range()?;
        let filter = TransactionFilter::default().between(Some(period.start), Some(period.end));
        let fallback = self.config.profit_loss_account_fallback;

        let (transactions, accounts) = if fallback {
            let accounts_filter = AccountFilter::active();
            tokio::try_join!(
                self.fetch("transactions", self.store.transactions(&filter)),
                self.fetch("accounts", self.store.accounts(&accounts_filter)),
            )?
        } else {
            let transactions = self
                .fetch("transactions", self.store.transactions(&filter))
                .await?;
            (transactions, Vec::new())
        };

        let report = IncomeService::profit_and_loss(&transactions, &accounts, period, fallback)?;
        info!(
            net_income = %report.net_income,
            from_account_balances = report.from_account_balances,
            "Profit and loss generated"
        );
        Ok(report)
    }

    /// Monthly cash flow for a period.
    #[instrument(skip(self))]
    pub async fn cash_flow(&self, query: &PeriodQuery) -> AppResult<CashFlowReport> {
        let period = query.range()?;
        let filter = TransactionFilter::default().between(Some(period.start), Some(period.end));
        let transactions = self
            .fetch("transactions", self.store.transactions(&filter))
            .await?;

        let report = IncomeService::cash_flow(&transactions, period);
        info!(months = report.monthly.len(), net = %report.totals.net, "Cash flow generated");
        Ok(report)
    }

    /// Income, expenses and balances for a period.
    #[instrument(skip(self))]
    pub async fn financial_summary(&self, query: &PeriodQuery) -> AppResult<FinancialSummary> {
        let period = query.range()?;
        let filter = TransactionFilter::default().between(Some(period.start), Some(period.end));
        let accounts_filter = AccountFilter::active();
        let asset_filter = AssetFilter::default();
        let (transactions, accounts, assets) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
            self.fetch("fixed assets", self.store.fixed_assets(&asset_filter)),
        )?;

        let summary = IncomeService::financial_summary(&transactions, &accounts, &assets, period);
        info!(net_profit = %summary.net_profit, "Financial summary generated");
        Ok(summary)
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Fixed asset register summary.
    #[instrument(skip(self))]
    pub async fn asset_performance(
        &self,
        query: &AssetPerformanceQuery,
    ) -> AppResult<AssetPerformanceReport> {
        let assets = self
            .fetch("fixed assets", self.store.fixed_assets(&AssetFilter::default()))
            .await?;

        let report = MetricsService::asset_performance(&assets, query.start_date, query.end_date);
        info!(assets = report.summary.asset_count, "Asset performance generated");
        Ok(report)
    }

    /// Headline dashboard figures.
    #[instrument(skip(self))]
    pub async fn dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        let limit = self.config.dashboard_recent_limit;
        let accounts_filter = AccountFilter::active();
        let asset_filter = AssetFilter::active();
        let (transactions, accounts, assets) = tokio::try_join!(
            self.fetch("recent transactions", self.store.recent_transactions(limit)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
            self.fetch("fixed assets", self.store.fixed_assets(&asset_filter)),
        )?;

        let metrics = MetricsService::dashboard(&transactions, &accounts, &assets, limit);
        info!(
            recent_transactions = metrics.recent_transaction_count,
            "Dashboard metrics generated"
        );
        Ok(metrics)
    }

    /// The `limit` most recently created transactions, newest first.
    /// Defaults to the dashboard limit.
    #[instrument(skip(self))]
    pub async fn recent_activity(&self, limit: Option<usize>) -> AppResult<Vec<Transaction>> {
        let limit = limit.unwrap_or(self.config.dashboard_recent_limit);
        let transactions = self
            .fetch("recent transactions", self.store.recent_transactions(limit))
            .await?;
        info!(limit, returned = transactions.len(), "Recent activity listed");
        Ok(transactions)
    }

    // ========================================================================
    // Books and cheques
    // ========================================================================

    /// Cash book over income and expense transactions.
    #[instrument(skip(self))]
    pub async fn cash_book(&self, query: &BookQuery) -> AppResult<Book> {
        let filter = query.transaction_filter()?;
        let accounts_filter = AccountFilter::default();
        let (transactions, accounts) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
        )?;

        let book = BookService::cash_book(
            transactions,
            &accounts,
            query.opening_balance.unwrap_or_default(),
            query.order.unwrap_or_default(),
        );
        info!(entries = book.entries.len(), closing = %book.closing_balance, "Cash book generated");
        Ok(book)
    }

    /// Bank book over transactions and issued cheques.
    #[instrument(skip(self))]
    pub async fn bank_book(&self, query: &BookQuery) -> AppResult<Book> {
        let filter = query.transaction_filter()?;
        let accounts_filter = AccountFilter::default();
        let cheque_filter = query.cheque_filter();
        let (transactions, accounts, cheques) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("accounts", self.store.accounts(&accounts_filter)),
            self.fetch("issued cheques", self.store.issued_cheques(&cheque_filter)),
        )?;

        let book = BookService::bank_book(
            transactions,
            &accounts,
            cheques,
            query.opening_balance.unwrap_or_default(),
            query.order.unwrap_or_default(),
        );
        info!(entries = book.entries.len(), closing = %book.closing_balance, "Bank book generated");
        Ok(book)
    }

    /// Issued cheque register.
    #[instrument(skip(self))]
    pub async fn issued_cheques(&self, query: &ChequeQuery) -> AppResult<Vec<IssuedCheque>> {
        let filter = query.filter()?;
        self.fetch("issued cheques", self.store.issued_cheques(&filter))
            .await
    }

    /// Received cheque register.
    #[instrument(skip(self))]
    pub async fn received_cheques(&self, query: &ChequeQuery) -> AppResult<Vec<ReceivedCheque>> {
        let filter = query.filter()?;
        self.fetch("received cheques", self.store.received_cheques(&filter))
            .await
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Reconciles a bank account.
    ///
    /// Without a statement balance this is a preview and writes nothing.
    /// With one, a reconciled result is committed as a single batch.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, query: ReconciliationQuery) -> AppResult<ReconciliationReport> {
        let input = query.into_input(Utc::now().date_naive())?;
        let filter = TransactionFilter::default()
            .for_account(input.bank_account_id)
            .between(input.start_date, input.end_date);
        let cheque_filter = ChequeFilter::uncleared(input.bank_account_id);

        let (transactions, cheques) = tokio::try_join!(
            self.fetch("transactions", self.store.transactions(&filter)),
            self.fetch("issued cheques", self.store.issued_cheques(&cheque_filter)),
        )?;

        let report = ReconciliationService::reconcile(
            &input,
            transactions,
            cheques,
            self.config.reconciliation_baseline,
        )?;

        if let Some(commit) = &report.commit {
            self.apply("reconciliation", self.store.apply_reconciliation(commit))
                .await?;
            info!(
                bank_account_id = %input.bank_account_id,
                matched = commit.matched_transaction_ids.len(),
                "Reconciliation committed"
            );
        } else if report.is_reconciled == Some(false) {
            warn!(
                bank_account_id = %input.bank_account_id,
                difference = ?report.difference,
                "Statement does not reconcile"
            );
        } else {
            info!(bank_account_id = %input.bank_account_id, "Reconciliation preview generated");
        }
        Ok(report)
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    /// Records a stock movement and returns the updated item.
    #[instrument(skip(self))]
    pub async fn record_movement(&self, request: MovementRequest) -> AppResult<InventoryItem> {
        let command = InventoryService::prepare_movement(request, Utc::now())?;
        let item = self
            .apply("stock movement", self.store.apply_movement(&command))
            .await?;
        info!(item_id = %item.id, quantity = %item.quantity, "Stock movement recorded");
        Ok(item)
    }

    /// All inventory items.
    #[instrument(skip(self))]
    pub async fn inventory_items(&self) -> AppResult<Vec<InventoryItem>> {
        self.fetch("inventory items", self.store.inventory_items())
            .await
    }

    /// Stock movements, newest first.
    #[instrument(skip(self))]
    pub async fn movements(&self, filter: &MovementFilter) -> AppResult<Vec<InventoryMovement>> {
        self.fetch("movements", self.store.movements(filter)).await
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// The stored settings, or defaults when none were saved.
    #[instrument(skip(self))]
    pub async fn settings(&self) -> AppResult<OrganizationSettings> {
        let stored = self.fetch("settings", self.store.settings()).await?;
        Ok(stored.unwrap_or_default())
    }

    /// Merges `update` into the stored settings and saves the result.
    #[instrument(skip(self))]
    pub async fn save_settings(&self, update: SettingsUpdate) -> AppResult<OrganizationSettings> {
        let current = self.settings().await?;
        let merged = update.merge(current, Utc::now())?;
        let saved = self
            .apply("settings", self.store.upsert_settings(&merged))
            .await?;
        info!(company_name = %saved.company_name, "Settings saved");
        Ok(saved)
    }
}
