//! Income statement and cash flow aggregation.
//!
//! All aggregations take a date range (inclusive) and ignore transactions
//! outside it, so callers may pass a wider record set than requested.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    CashFlowBucket, CashFlowReport, DateRange, FinancialSummary, IncomeSummary, ProfitLossItem,
    ProfitLossReport, ProfitLossSection, UNCATEGORIZED,
};
use crate::assets::{FixedAsset, FixedAssetTotals};
use crate::ledger::{Account, AccountType, Transaction, TransactionType};

/// Service for period-based income and cash reports.
pub struct IncomeService;

impl IncomeService {
    /// Totals and per-category breakdowns over transactions in `period`.
    ///
    /// Transactions without a category are grouped under `"Uncategorized"`.
    #[must_use]
    pub fn summarize<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        period: &DateRange,
    ) -> IncomeSummary {
        let mut summary = IncomeSummary::default();

        for txn in transactions.into_iter().filter(|t| period.contains(t.date)) {
            let category = txn
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            let (total, by_category) = match txn.transaction_type {
                TransactionType::Income => {
                    (&mut summary.total_income, &mut summary.income_by_category)
                }
                TransactionType::Expense => {
                    (&mut summary.total_expenses, &mut summary.expenses_by_category)
                }
            };
            *total += txn.amount;
            *by_category.entry(category).or_default() += txn.amount;
            summary.transaction_count += 1;
        }

        summary.net_profit = summary.total_income - summary.total_expenses;
        summary
    }

    /// Generates a profit & loss statement.
    ///
    /// With `account_fallback` set and no transactions in the period, items
    /// are taken from active revenue and expense account balances instead.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the fallback meets an account of
    /// unknown type.
    pub fn profit_and_loss(
        transactions: &[Transaction],
        accounts: &[Account],
        period: DateRange,
        account_fallback: bool,
    ) -> Result<ProfitLossReport, ReportError> {
        let summary = Self::summarize(transactions, &period);

        let (revenue, expenses, from_account_balances) =
            if account_fallback && summary.transaction_count == 0 {
                let (revenue, expenses) = Self::sections_from_accounts(accounts)?;
                (revenue, expenses, true)
            } else {
                (
                    Self::section(summary.income_by_category),
                    Self::section(summary.expenses_by_category),
                    false,
                )
            };

        let net_income = revenue.total - expenses.total;
        let net_income_percentage = if revenue.total.is_zero() {
            Decimal::ZERO
        } else {
            (net_income / revenue.total * Decimal::ONE_HUNDRED).round_dp(2)
        };

        Ok(ProfitLossReport {
            period,
            revenue,
            expenses,
            net_income,
            net_income_percentage,
            from_account_balances,
        })
    }

    /// Generates a cash flow report bucketed by calendar month (`YYYY-MM`).
    #[must_use]
    pub fn cash_flow(transactions: &[Transaction], period: DateRange) -> CashFlowReport {
        let mut monthly: BTreeMap<String, CashFlowBucket> = BTreeMap::new();
        let mut totals = CashFlowBucket::default();

        for txn in transactions.iter().filter(|t| period.contains(t.date)) {
            let month = txn.date.format("%Y-%m").to_string();
            monthly.entry(month).or_default().record(txn.cash_effect());
            totals.record(txn.cash_effect());
        }

        CashFlowReport {
            period,
            monthly,
            totals,
        }
    }

    /// Generates the period financial summary.
    ///
    /// `total_assets` covers the whole register, whatever the status.
    #[must_use]
    pub fn financial_summary(
        transactions: &[Transaction],
        accounts: &[Account],
        fixed_assets: &[FixedAsset],
        period: DateRange,
    ) -> FinancialSummary {
        let summary = Self::summarize(transactions, &period);

        FinancialSummary {
            period,
            income: summary.total_income,
            expenses: summary.total_expenses,
            net_profit: summary.net_profit,
            total_assets: FixedAssetTotals::of(fixed_assets).current_value,
            total_account_balance: accounts
                .iter()
                .filter(|a| a.is_active)
                .map(|a| a.balance)
                .sum(),
            transaction_count: summary.transaction_count,
        }
    }

    fn section(by_category: BTreeMap<String, Decimal>) -> ProfitLossSection {
        let total = by_category.values().copied().sum();
        let items = by_category
            .into_iter()
            .map(|(category, amount)| ProfitLossItem { category, amount })
            .collect();
        ProfitLossSection { items, total }
    }

    fn sections_from_accounts(
        accounts: &[Account],
    ) -> Result<(ProfitLossSection, ProfitLossSection), ReportError> {
        let mut revenue: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut expenses: BTreeMap<String, Decimal> = BTreeMap::new();

        for account in accounts.iter().filter(|a| a.is_active) {
            let target = match account.kind()? {
                AccountType::Revenue => &mut revenue,
                AccountType::Expense => &mut expenses,
                AccountType::Asset | AccountType::Liability | AccountType::Equity => continue,
            };
            *target.entry(account.name.clone()).or_default() += account.balance;
        }

        Ok((Self::section(revenue), Self::section(expenses)))
    }
}
