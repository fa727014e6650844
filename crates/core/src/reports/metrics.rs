//! Asset performance and dashboard metrics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AssetPerformanceReport, AssetSummary, CategoryPerformance, DashboardMetrics, UNCATEGORIZED,
    UNKNOWN_STATUS,
};
use crate::assets::{FixedAsset, FixedAssetTotals};
use crate::ledger::{Account, Transaction, TransactionType};

/// Service for register-wide and headline metrics.
pub struct MetricsService;

impl MetricsService {
    /// Summarizes the whole fixed asset register.
    ///
    /// The dates are echoed only; the register is not filtered by them.
    #[must_use]
    pub fn asset_performance(
        fixed_assets: &[FixedAsset],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AssetPerformanceReport {
        let mut by_category: BTreeMap<String, CategoryPerformance> = BTreeMap::new();
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();

        for asset in fixed_assets {
            let category = asset
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            let entry = by_category.entry(category).or_default();
            entry.count += 1;
            entry.purchase_price += asset.purchase_price;
            entry.current_value += asset.current_value;
            entry.depreciation += asset.depreciation();

            let status = if asset.status.trim().is_empty() {
                UNKNOWN_STATUS.to_string()
            } else {
                asset.status.clone()
            };
            *by_status.entry(status).or_default() += 1;
        }

        let total_purchase_price: Decimal = fixed_assets.iter().map(|a| a.purchase_price).sum();
        let totals = FixedAssetTotals::of(fixed_assets);
        let depreciation_rate = if total_purchase_price > Decimal::ZERO {
            (totals.depreciation / total_purchase_price * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };

        AssetPerformanceReport {
            start_date,
            end_date,
            summary: AssetSummary {
                asset_count: fixed_assets.len(),
                total_purchase_price,
                total_current_value: totals.current_value,
                total_depreciation: totals.depreciation,
                depreciation_rate,
            },
            by_category,
            by_status,
        }
    }

    /// Headline figures for the dashboard.
    ///
    /// Revenue and expenses cover only the `recent_limit` most recently
    /// created transactions; account and asset figures cover active records.
    #[must_use]
    pub fn dashboard(
        transactions: &[Transaction],
        accounts: &[Account],
        fixed_assets: &[FixedAsset],
        recent_limit: usize,
    ) -> DashboardMetrics {
        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(recent_limit);

        let sum_of = |kind: TransactionType| -> Decimal {
            recent
                .iter()
                .filter(|t| t.transaction_type == kind)
                .map(|t| t.amount)
                .sum()
        };
        let total_revenue = sum_of(TransactionType::Income);
        let total_expenses = sum_of(TransactionType::Expense);

        let active_accounts: Vec<&Account> = accounts.iter().filter(|a| a.is_active).collect();
        let active_assets: Vec<&FixedAsset> =
            fixed_assets.iter().filter(|a| a.is_active()).collect();

        DashboardMetrics {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            total_assets: active_assets.iter().map(|a| a.current_value).sum(),
            total_account_balance: active_accounts.iter().map(|a| a.balance).sum(),
            active_accounts: active_accounts.len(),
            recent_transaction_count: recent.len(),
            asset_count: active_assets.len(),
        }
    }
}
