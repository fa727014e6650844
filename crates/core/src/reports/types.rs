//! Report data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledgerline_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Tolerance for trial balance and balance sheet checks (one currency unit).
pub const BALANCE_TOLERANCE: Decimal = Decimal::ONE;

/// Label used when a transaction or asset has no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Label used when an asset has no status.
pub const UNKNOWN_STATUS: &str = "Unknown";

// ============================================================================
// Periods
// ============================================================================

/// An inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Checks an optional pair of bounds without requiring both.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if both are given and `start > end`.
    pub fn check_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), ReportError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Returns true if `date` falls within the range (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ============================================================================
// Trial Balance
// ============================================================================

/// One trial balance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type as stored.
    pub account_type: String,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

/// Column totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Date the report was requested for, if any.
    pub as_of: Option<NaiveDate>,
    /// Rows ordered by account code.
    pub accounts: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
    /// `|difference| < 1`.
    pub is_balanced: bool,
    /// `totals.debit - totals.credit`, signed.
    pub difference: Decimal,
}

// ============================================================================
// Balance Sheet
// ============================================================================

/// A balance sheet line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    /// Source account, absent for lines derived from the fixed asset register.
    pub account_id: Option<AccountId>,
    /// Account code, absent for derived lines.
    pub code: Option<String>,
    /// Line label.
    pub name: String,
    /// Amount.
    pub amount: Decimal,
}

/// Current/non-current totals of a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotals {
    /// Sum of current lines.
    pub current: Decimal,
    /// Sum of non-current lines.
    pub non_current: Decimal,
    /// Section total.
    pub total: Decimal,
}

/// Assets or liabilities, split into current and non-current.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSection {
    /// Current lines.
    pub current: Vec<BalanceSheetLine>,
    /// Non-current lines.
    pub non_current: Vec<BalanceSheetLine>,
    /// Totals.
    pub totals: SectionTotals,
}

/// Equity section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquitySection {
    /// Equity lines.
    pub accounts: Vec<BalanceSheetLine>,
    /// Sum of equity balances.
    pub total: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Date the report was requested for, if any.
    pub as_of: Option<NaiveDate>,
    /// Assets.
    pub assets: ClassifiedSection,
    /// Liabilities.
    pub liabilities: ClassifiedSection,
    /// Equity.
    pub equity: EquitySection,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: Decimal,
    /// `|difference| < 1`.
    pub is_balanced: bool,
    /// `assets - (liabilities + equity)`, signed.
    pub difference: Decimal,
}

// ============================================================================
// Income Statement & Cash Flow
// ============================================================================

/// Income/expense totals and category breakdowns for a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    /// Sum of income amounts.
    pub total_income: Decimal,
    /// Sum of expense amounts.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_profit: Decimal,
    /// Income per category.
    pub income_by_category: BTreeMap<String, Decimal>,
    /// Expenses per category.
    pub expenses_by_category: BTreeMap<String, Decimal>,
    /// Number of transactions considered.
    pub transaction_count: usize,
}

/// A profit & loss line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLossItem {
    /// Category (or account name in fallback mode).
    pub category: String,
    /// Amount.
    pub amount: Decimal,
}

/// Revenue or expense section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLossSection {
    /// Lines sorted by category.
    pub items: Vec<ProfitLossItem>,
    /// Section total.
    pub total: Decimal,
}

/// Profit & loss report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLossReport {
    /// Reporting period.
    pub period: DateRange,
    /// Revenue.
    pub revenue: ProfitLossSection,
    /// Expenses.
    pub expenses: ProfitLossSection,
    /// `revenue.total - expenses.total`.
    pub net_income: Decimal,
    /// Net income as a percentage of revenue, 2dp; 0 without revenue.
    pub net_income_percentage: Decimal,
    /// True when items were taken from account balances.
    pub from_account_balances: bool,
}

/// Cash movement for one month or the whole period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowBucket {
    /// Sum of income.
    pub inflows: Decimal,
    /// Sum of expenses.
    pub outflows: Decimal,
    /// `inflows - outflows`.
    pub net: Decimal,
}

impl CashFlowBucket {
    /// Adds one signed cash effect.
    pub fn record(&mut self, cash_effect: Decimal) {
        if cash_effect.is_sign_negative() {
            self.outflows += -cash_effect;
        } else {
            self.inflows += cash_effect;
        }
        self.net = self.inflows - self.outflows;
    }
}

/// Cash flow report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Reporting period.
    pub period: DateRange,
    /// Buckets keyed by `YYYY-MM`.
    pub monthly: BTreeMap<String, CashFlowBucket>,
    /// Whole-period totals.
    pub totals: CashFlowBucket,
}

/// Financial summary for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Reporting period.
    pub period: DateRange,
    /// Sum of income.
    pub income: Decimal,
    /// Sum of expenses.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net_profit: Decimal,
    /// Carrying value of the whole asset register.
    pub total_assets: Decimal,
    /// Sum of active account balances.
    pub total_account_balance: Decimal,
    /// Transactions in the period.
    pub transaction_count: usize,
}

// ============================================================================
// Assets & Dashboard
// ============================================================================

/// Register-wide asset figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    /// Number of assets.
    pub asset_count: usize,
    /// Sum of purchase prices.
    pub total_purchase_price: Decimal,
    /// Sum of carrying values.
    pub total_current_value: Decimal,
    /// Sum of depreciation.
    pub total_depreciation: Decimal,
    /// Depreciation as a percentage of purchase price, 2dp.
    pub depreciation_rate: Decimal,
}

/// Asset figures for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    /// Number of assets.
    pub count: usize,
    /// Sum of purchase prices.
    pub purchase_price: Decimal,
    /// Sum of carrying values.
    pub current_value: Decimal,
    /// Sum of depreciation.
    pub depreciation: Decimal,
}

/// Asset performance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPerformanceReport {
    /// Requested period start, echoed.
    pub start_date: Option<NaiveDate>,
    /// Requested period end, echoed.
    pub end_date: Option<NaiveDate>,
    /// Register-wide figures.
    pub summary: AssetSummary,
    /// Figures per category.
    pub by_category: BTreeMap<String, CategoryPerformance>,
    /// Asset count per status.
    pub by_status: BTreeMap<String, usize>,
}

/// Headline dashboard figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Income over the recent transactions.
    pub total_revenue: Decimal,
    /// Expenses over the recent transactions.
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`.
    pub net_profit: Decimal,
    /// Carrying value of active fixed assets.
    pub total_assets: Decimal,
    /// Sum of active account balances.
    pub total_account_balance: Decimal,
    /// Number of active accounts.
    pub active_accounts: usize,
    /// Number of recent transactions considered.
    pub recent_transaction_count: usize,
    /// Number of active fixed assets.
    pub asset_count: usize,
}
