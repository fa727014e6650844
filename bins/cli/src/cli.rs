//! Command-line definitions and their mapping onto engine queries.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerline_core::cheques::ChequeStatus;
use ledgerline_core::inventory::{MovementRequest, MovementType};
use ledgerline_core::ledger::DisplayOrder;
use ledgerline_core::settings::SettingsUpdate;
use ledgerline_service::{
    AsOfQuery, AssetPerformanceQuery, BookQuery, ChequeQuery, LedgerQuery, PeriodQuery,
    ReconciliationQuery,
};
use ledgerline_shared::types::{AccountId, InventoryItemId, TransactionId};
use ledgerline_store::MovementFilter;
use rust_decimal::Decimal;

/// Ledger aggregation and reporting engine.
#[derive(Parser, Debug)]
#[command(name = "ledgerline", version, about, long_about = None)]
pub struct Cli {
    /// JSON snapshot of the ledger records. Starts empty when omitted.
    #[arg(long, env = "LEDGERLINE_SNAPSHOT", value_name = "FILE", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Save the snapshot back to its file after a command that writes.
    #[arg(long, global = true)]
    pub write_back: bool,

    /// The operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-account ledger with running balances
    GeneralLedger(LedgerArgs),
    /// Journal entries with debit and credit columns
    Journal(LedgerArgs),
    /// Trial balance over active accounts
    TrialBalance(AsOfArgs),
    /// Classified balance sheet
    BalanceSheet(AsOfArgs),
    /// Profit and loss for a period
    ProfitAndLoss(PeriodArgs),
    /// Monthly cash flow for a period
    CashFlow(PeriodArgs),
    /// Income, expenses and balances for a period
    FinancialSummary(PeriodArgs),
    /// Fixed asset register summary
    AssetPerformance(DateBoundArgs),
    /// Headline dashboard figures
    Dashboard,
    /// Most recently created transactions
    RecentActivity(RecentArgs),
    /// Cash book with running balance
    CashBook(BookArgs),
    /// Bank book with running balance, including issued cheques
    BankBook(BookArgs),
    /// Cheque register
    Cheques(ChequeArgs),
    /// Bank reconciliation. Previews unless a statement balance is given
    Reconcile(ReconcileArgs),
    /// Record a stock movement
    RecordMovement(MovementArgs),
    /// Inventory items, or stock movements with --movements
    Inventory(InventoryArgs),
    /// Show organization settings
    Settings,
    /// Update organization settings
    SaveSettings(SettingsArgs),
}

impl Command {
    /// Returns true if the command may change the records.
    pub const fn writes(&self) -> bool {
        matches!(
            self,
            Self::Reconcile(_) | Self::RecordMovement(_) | Self::SaveSettings(_)
        )
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// Optional date bounds.
#[derive(Args, Debug, Clone, Default)]
pub struct DateBoundArgs {
    /// First date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// Last date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
}

/// General ledger and journal arguments.
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    #[command(flatten)]
    pub dates: DateBoundArgs,
    /// Restrict to one account
    #[arg(long)]
    pub account_id: Option<AccountId>,
}

/// Point-in-time report arguments.
#[derive(Args, Debug, Clone)]
pub struct AsOfArgs {
    /// Report date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Recent activity arguments.
#[derive(Args, Debug, Clone)]
pub struct RecentArgs {
    /// Number of transactions (defaults to the configured dashboard limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Period report arguments.
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    #[command(flatten)]
    pub dates: DateBoundArgs,
}

/// Cash and bank book arguments.
#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    #[command(flatten)]
    pub dates: DateBoundArgs,
    /// Restrict to one bank account
    #[arg(long)]
    pub bank_account_id: Option<AccountId>,
    /// Balance before the first entry
    #[arg(long)]
    pub opening_balance: Option<Decimal>,
    /// Presentation order
    #[arg(long, value_enum)]
    pub order: Option<Order>,
}

/// Presentation order.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Order {
    /// Oldest first
    Chronological,
    /// Newest first
    NewestFirst,
}

/// Cheque register arguments.
#[derive(Args, Debug, Clone)]
pub struct ChequeArgs {
    /// Which register to list
    #[arg(long, value_enum, default_value = "issued")]
    pub register: Register,
    #[command(flatten)]
    pub dates: DateBoundArgs,
    /// Restrict to one bank account
    #[arg(long)]
    pub bank_account_id: Option<AccountId>,
    /// Restrict to one status
    #[arg(long, value_enum)]
    pub status: Option<Status>,
}

/// Cheque register.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Cheques written
    Issued,
    /// Cheques received
    Received,
}

/// Cheque status.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Status {
    /// Written, not yet presented
    Issued,
    /// Presented at the bank
    Presented,
    /// Settled
    Cleared,
    /// Returned unpaid
    Bounced,
    /// Voided
    Cancelled,
    /// Paid in
    Deposited,
}

/// Reconciliation arguments.
#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    /// Bank account to reconcile
    #[arg(long)]
    pub bank_account_id: Option<AccountId>,
    #[command(flatten)]
    pub dates: DateBoundArgs,
    /// Balance reported by the bank
    #[arg(long)]
    pub statement_balance: Option<Decimal>,
    /// Transactions matched against the statement (repeatable)
    #[arg(long = "matched", value_name = "TRANSACTION_ID")]
    pub matched_transaction_ids: Vec<TransactionId>,
    /// Date recorded on the account (defaults to today)
    #[arg(long)]
    pub reconciliation_date: Option<NaiveDate>,
}

/// Stock movement arguments.
#[derive(Args, Debug, Clone)]
pub struct MovementArgs {
    /// Item to move
    #[arg(long)]
    pub item_id: InventoryItemId,
    /// Movement type
    #[arg(long = "type", value_enum)]
    pub movement_type: Movement,
    /// Quantity (signed for adjustments)
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Decimal,
    /// Free-text reference
    #[arg(long)]
    pub reference: Option<String>,
}

/// Stock movement type.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Movement {
    /// Stock received
    In,
    /// Stock issued
    Out,
    /// Signed correction
    Adjustment,
}

/// Inventory listing arguments.
#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    /// List stock movements instead of items
    #[arg(long)]
    pub movements: bool,
    /// Only movements of this item
    #[arg(long, requires = "movements")]
    pub item_id: Option<InventoryItemId>,
}

/// Settings update arguments. Omitted fields keep their stored value.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Company name
    #[arg(long)]
    pub company_name: Option<String>,
    /// Three-letter currency code
    #[arg(long)]
    pub base_currency: Option<String>,
    /// First month of the fiscal year (1-12)
    #[arg(long)]
    pub fiscal_year_start_month: Option<u32>,
    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
    /// Tax identifier
    #[arg(long)]
    pub tax_id: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<LedgerArgs> for LedgerQuery {
    fn from(args: LedgerArgs) -> Self {
        Self {
            start_date: args.dates.start_date,
            end_date: args.dates.end_date,
            account_id: args.account_id,
        }
    }
}

impl From<AsOfArgs> for AsOfQuery {
    fn from(args: AsOfArgs) -> Self {
        Self { date: args.date }
    }
}

impl From<PeriodArgs> for PeriodQuery {
    fn from(args: PeriodArgs) -> Self {
        Self {
            start_date: args.dates.start_date,
            end_date: args.dates.end_date,
        }
    }
}

impl From<DateBoundArgs> for AssetPerformanceQuery {
    fn from(args: DateBoundArgs) -> Self {
        Self {
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }
}

impl From<Order> for DisplayOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Chronological => Self::Chronological,
            Order::NewestFirst => Self::NewestFirst,
        }
    }
}

impl From<BookArgs> for BookQuery {
    fn from(args: BookArgs) -> Self {
        Self {
            start_date: args.dates.start_date,
            end_date: args.dates.end_date,
            bank_account_id: args.bank_account_id,
            opening_balance: args.opening_balance,
            order: args.order.map(DisplayOrder::from),
        }
    }
}

impl From<Status> for ChequeStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Issued => Self::Issued,
            Status::Presented => Self::Presented,
            Status::Cleared => Self::Cleared,
            Status::Bounced => Self::Bounced,
            Status::Cancelled => Self::Cancelled,
            Status::Deposited => Self::Deposited,
        }
    }
}

impl ChequeArgs {
    /// The register to list and its query.
    pub fn into_query(self) -> (Register, ChequeQuery) {
        let query = ChequeQuery {
            bank_account_id: self.bank_account_id,
            status: self.status.map(ChequeStatus::from),
            start_date: self.dates.start_date,
            end_date: self.dates.end_date,
        };
        (self.register, query)
    }
}

impl From<ReconcileArgs> for ReconciliationQuery {
    fn from(args: ReconcileArgs) -> Self {
        Self {
            bank_account_id: args.bank_account_id,
            start_date: args.dates.start_date,
            end_date: args.dates.end_date,
            statement_balance: args.statement_balance,
            matched_transaction_ids: args.matched_transaction_ids,
            reconciliation_date: args.reconciliation_date,
        }
    }
}

impl From<MovementArgs> for MovementRequest {
    fn from(args: MovementArgs) -> Self {
        let movement_type = match args.movement_type {
            Movement::In => MovementType::In,
            Movement::Out => MovementType::Out,
            Movement::Adjustment => MovementType::Adjustment,
        };
        Self {
            item_id: args.item_id,
            movement_type,
            quantity: args.quantity,
            reference: args.reference,
        }
    }
}

impl InventoryArgs {
    /// The movement filter, when movements were requested.
    pub fn movement_filter(&self) -> Option<MovementFilter> {
        self.movements.then(|| MovementFilter {
            item_id: self.item_id,
            movement_type: None,
        })
    }
}

impl From<SettingsArgs> for SettingsUpdate {
    fn from(args: SettingsArgs) -> Self {
        Self {
            company_name: args.company_name,
            base_currency: args.base_currency,
            fiscal_year_start_month: args.fiscal_year_start_month,
            address: args.address,
            tax_id: args.tax_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_reconcile_arguments() {
        let bank = AccountId::new();
        let txn = TransactionId::new();
        let cli = Cli::try_parse_from([
            "ledgerline",
            "reconcile",
            "--bank-account-id",
            &bank.to_string(),
            "--statement-balance",
            "850.00",
            "--matched",
            &txn.to_string(),
        ])
        .unwrap();

        assert!(cli.command.writes());
        let Command::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };
        let query = ReconciliationQuery::from(args);
        assert_eq!(query.bank_account_id, Some(bank));
        assert_eq!(query.statement_balance, Some(Decimal::new(85000, 2)));
        assert_eq!(query.matched_transaction_ids, vec![txn]);
    }

    #[test]
    fn test_negative_adjustment_quantity() {
        let item = InventoryItemId::new();
        let cli = Cli::try_parse_from([
            "ledgerline",
            "record-movement",
            "--item-id",
            &item.to_string(),
            "--type",
            "adjustment",
            "--quantity",
            "-4",
        ])
        .unwrap();

        let Command::RecordMovement(args) = cli.command else {
            panic!("expected record-movement");
        };
        let request = MovementRequest::from(args);
        assert_eq!(request.movement_type, MovementType::Adjustment);
        assert_eq!(request.quantity, Decimal::from(-4));
    }

    #[test]
    fn test_recent_activity_limit_is_optional() {
        let cli = Cli::try_parse_from(["ledgerline", "recent-activity", "--limit", "3"]).unwrap();
        assert!(!cli.command.writes());
        let Command::RecentActivity(args) = cli.command else {
            panic!("expected recent-activity");
        };
        assert_eq!(args.limit, Some(3));

        let cli = Cli::try_parse_from(["ledgerline", "recent-activity"]).unwrap();
        let Command::RecentActivity(args) = cli.command else {
            panic!("expected recent-activity");
        };
        assert_eq!(args.limit, None);
    }

    #[test]
    fn test_reports_do_not_write() {
        let cli = Cli::try_parse_from(["ledgerline", "trial-balance"]).unwrap();
        assert!(!cli.command.writes());
    }
}
