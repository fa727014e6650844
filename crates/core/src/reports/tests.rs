//! Property-based tests for reports module.

use chrono::NaiveDate;
use ledgerline_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::income::IncomeService;
use super::service::{DEPRECIATION_LINE, PPE_LINE, ReportService};
use super::types::{BALANCE_TOLERANCE, DateRange};
use crate::assets::FixedAsset;
use crate::ledger::{Account, AccountType, Transaction, TransactionType};

/// Strategy for generating signed balances with cents.
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating a chart of accounts with arbitrary balances.
fn accounts_strategy(max_len: usize) -> impl Strategy<Value = Vec<Account>> {
    prop::collection::vec(
        (0usize..AccountType::ALL.len(), balance_strategy(), any::<bool>()),
        0..=max_len,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, balance, active))| {
                let account = Account::new(
                    format!("{:04}", 1000 + i),
                    format!("Account {i}"),
                    AccountType::ALL[kind].as_str(),
                    balance,
                );
                if active { account } else { account.inactive() }
            })
            .collect()
    })
}

/// Strategy for generating January 2024 transactions.
fn transactions_strategy(max_len: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(
        (1u32..=31, 1i64..1_000_000, any::<bool>(), 0usize..4),
        0..=max_len,
    )
    .prop_map(|specs| {
        let account = AccountId::new();
        specs
            .into_iter()
            .map(|(day, cents, income, category)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
                let kind = if income {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                let txn = Transaction::new(account, date, Decimal::new(cents, 2), kind);
                match category {
                    0 => txn,
                    n => txn.with_category(format!("Category {n}")),
                }
            })
            .collect()
    })
}

fn january() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The reported difference is exactly debit minus credit, and the
    /// balanced flag agrees with the tolerance.
    #[test]
    fn prop_trial_balance_difference_and_flag(accounts in accounts_strategy(25)) {
        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();

        prop_assert_eq!(report.difference, report.totals.debit - report.totals.credit);
        prop_assert_eq!(report.is_balanced, report.difference.abs() < BALANCE_TOLERANCE);
    }

    /// Each row has at most one non-zero column, and only active accounts are listed.
    #[test]
    fn prop_trial_balance_rows_are_one_sided(accounts in accounts_strategy(25)) {
        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();

        let active = accounts.iter().filter(|a| a.is_active).count();
        prop_assert_eq!(report.accounts.len(), active);
        for row in &report.accounts {
            prop_assert!(row.debit.is_zero() || row.credit.is_zero());
            prop_assert!(!row.debit.is_sign_negative() || row.debit.is_zero());
            prop_assert!(!row.credit.is_sign_negative() || row.credit.is_zero());
        }
        let codes: Vec<_> = report.accounts.iter().map(|r| r.account_code.clone()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        prop_assert_eq!(codes, sorted);
    }

    /// Assets = Liabilities + Equity yields a balanced sheet.
    #[test]
    fn prop_balance_sheet_equation(
        asset_balance in 0i64..1_000_000_000,
        liability_balance in 0i64..500_000_000,
    ) {
        let asset_balance = Decimal::new(asset_balance, 2);
        let liability_balance = Decimal::new(liability_balance, 2);
        let equity_balance = asset_balance - liability_balance;

        let accounts = vec![
            Account::new("1000", "Cash", "asset", asset_balance),
            Account::new("2000", "Accounts Payable", "liability", liability_balance),
            Account::new("3000", "Retained Earnings", "equity", equity_balance),
        ];

        let report = ReportService::generate_balance_sheet(&accounts, &[], None).unwrap();

        prop_assert!(report.is_balanced);
        prop_assert_eq!(report.difference, Decimal::ZERO);
        prop_assert_eq!(report.assets.totals.total, report.total_liabilities_and_equity);
    }

    /// Section totals add up from their current and non-current parts.
    #[test]
    fn prop_balance_sheet_section_totals(accounts in accounts_strategy(25)) {
        let report = ReportService::generate_balance_sheet(&accounts, &[], None).unwrap();

        for section in [&report.assets, &report.liabilities] {
            let current: Decimal = section.current.iter().map(|l| l.amount).sum();
            let non_current: Decimal = section.non_current.iter().map(|l| l.amount).sum();
            prop_assert_eq!(section.totals.current, current);
            prop_assert_eq!(section.totals.non_current, non_current);
            prop_assert_eq!(section.totals.total, current + non_current);
        }
        prop_assert_eq!(
            report.difference,
            report.assets.totals.total - report.total_liabilities_and_equity
        );
    }

    /// Computing a report twice over the same snapshot gives identical bytes.
    #[test]
    fn prop_reports_are_idempotent(
        accounts in accounts_strategy(15),
        transactions in transactions_strategy(30),
    ) {
        let tb1 = serde_json::to_string(&ReportService::generate_trial_balance(&accounts, None).unwrap()).unwrap();
        let tb2 = serde_json::to_string(&ReportService::generate_trial_balance(&accounts, None).unwrap()).unwrap();
        prop_assert_eq!(tb1, tb2);

        let pl1 = serde_json::to_string(&IncomeService::profit_and_loss(&transactions, &accounts, january(), false).unwrap()).unwrap();
        let pl2 = serde_json::to_string(&IncomeService::profit_and_loss(&transactions, &accounts, january(), false).unwrap()).unwrap();
        prop_assert_eq!(pl1, pl2);

        let cf1 = serde_json::to_string(&IncomeService::cash_flow(&transactions, january())).unwrap();
        let cf2 = serde_json::to_string(&IncomeService::cash_flow(&transactions, january())).unwrap();
        prop_assert_eq!(cf1, cf2);
    }

    /// Net profit is income minus expenses, and category maps add up to the totals.
    #[test]
    fn prop_income_summary_totals(transactions in transactions_strategy(40)) {
        let summary = IncomeService::summarize(&transactions, &january());

        prop_assert_eq!(summary.net_profit, summary.total_income - summary.total_expenses);
        prop_assert_eq!(summary.income_by_category.values().copied().sum::<Decimal>(), summary.total_income);
        prop_assert_eq!(summary.expenses_by_category.values().copied().sum::<Decimal>(), summary.total_expenses);
        prop_assert_eq!(summary.transaction_count, transactions.len());
    }

    /// Monthly cash flow buckets add up to the period totals.
    #[test]
    fn prop_cash_flow_buckets_sum_to_totals(transactions in transactions_strategy(40)) {
        let report = IncomeService::cash_flow(&transactions, january());

        let inflows: Decimal = report.monthly.values().map(|b| b.inflows).sum();
        let outflows: Decimal = report.monthly.values().map(|b| b.outflows).sum();
        prop_assert_eq!(inflows, report.totals.inflows);
        prop_assert_eq!(outflows, report.totals.outflows);
        prop_assert_eq!(report.totals.net, inflows - outflows);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::ledger::{AccountClassification, LedgerError};
    use crate::reports::ReportError;

    #[test]
    fn test_trial_balance_sign_scenarios() {
        let accounts = vec![
            Account::new("1000", "Cash", "asset", dec!(500)),
            Account::new("1100", "Overdrawn Bank", "asset", dec!(-200)),
        ];

        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();

        assert_eq!(report.accounts[0].debit, dec!(500));
        assert_eq!(report.accounts[0].credit, dec!(0));
        assert_eq!(report.accounts[1].debit, dec!(0));
        assert_eq!(report.accounts[1].credit, dec!(200));
        assert_eq!(report.difference, dec!(300));
        assert!(!report.is_balanced);
    }

    #[test]
    fn test_trial_balance_tolerance_is_one_unit() {
        let accounts = vec![
            Account::new("1000", "Cash", "asset", dec!(1000.99)),
            Account::new("3000", "Capital", "equity", dec!(1000)),
        ];
        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();
        assert_eq!(report.difference, dec!(0.99));
        assert!(report.is_balanced);

        let accounts = vec![
            Account::new("1000", "Cash", "asset", dec!(1001)),
            Account::new("3000", "Capital", "equity", dec!(1000)),
        ];
        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();
        assert!(!report.is_balanced);
    }

    #[test]
    fn test_trial_balance_orders_by_code_and_skips_inactive() {
        let accounts = vec![
            Account::new("4000", "Sales", "revenue", dec!(100)),
            Account::new("1000", "Cash", "asset", dec!(100)),
            Account::new("9999", "Suspense", "mystery", dec!(1)).inactive(),
        ];

        let report = ReportService::generate_trial_balance(&accounts, None).unwrap();

        let codes: Vec<_> = report.accounts.iter().map(|r| r.account_code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "4000"]);
        assert!(report.is_balanced);
    }

    #[test]
    fn test_trial_balance_rejects_unknown_type() {
        let accounts = vec![Account::new("9999", "Suspense", "mystery", dec!(1))];

        let err = ReportService::generate_trial_balance(&accounts, None).unwrap_err();
        assert_eq!(
            err,
            ReportError::Ledger(LedgerError::UnclassifiedAccountType("mystery".into()))
        );
    }

    #[test]
    fn test_trial_balance_empty_accounts() {
        let report = ReportService::generate_trial_balance(&[], None).unwrap();

        assert_eq!(report.totals.debit, dec!(0));
        assert_eq!(report.totals.credit, dec!(0));
        assert!(report.is_balanced);
    }

    #[test]
    fn test_balance_sheet_classification_and_fixed_assets() {
        let accounts = vec![
            Account::new("1000", "Cash on Hand", "asset", dec!(5000)),
            Account::new("1200", "Accounts Receivable", "asset", dec!(2000)),
            Account::new("1500", "Security Deposit", "asset", dec!(1000)),
            Account::new("2000", "Accounts Payable", "liability", dec!(3000)),
            Account::new("2500", "Bank Loan", "liability", dec!(10000))
                .with_classification(AccountClassification::NonCurrent),
            Account::new("3000", "Owner's Capital", "equity", dec!(10000)),
            Account::new("4000", "Sales", "revenue", dec!(99999)),
        ];
        let assets = vec![
            FixedAsset::new("Van", dec!(20000), dec!(15000)),
            FixedAsset::new("Scrapped", dec!(800), dec!(0)).with_status("Disposed"),
        ];

        let report = ReportService::generate_balance_sheet(&accounts, &assets, None).unwrap();

        assert_eq!(report.assets.current.len(), 2);
        assert_eq!(report.assets.totals.current, dec!(7000));
        let non_current: Vec<_> = report
            .assets
            .non_current
            .iter()
            .map(|l| (l.name.as_str(), l.amount))
            .collect();
        assert_eq!(
            non_current,
            vec![
                ("Security Deposit", dec!(1000)),
                (PPE_LINE, dec!(20000)),
                (DEPRECIATION_LINE, dec!(-5000)),
            ]
        );
        assert_eq!(report.assets.totals.total, dec!(23000));

        assert_eq!(report.liabilities.totals.current, dec!(3000));
        assert_eq!(report.liabilities.totals.non_current, dec!(10000));
        assert_eq!(report.equity.total, dec!(10000));
        assert_eq!(report.total_liabilities_and_equity, dec!(23000));
        assert!(report.is_balanced);
    }

    #[test]
    fn test_balance_sheet_omits_depreciation_line_without_depreciation() {
        let assets = vec![FixedAsset::new("Land", dec!(50000), dec!(60000))];

        let report = ReportService::generate_balance_sheet(&[], &assets, None).unwrap();

        assert_eq!(report.assets.non_current.len(), 1);
        assert_eq!(report.assets.non_current[0].name, PPE_LINE);
        assert_eq!(report.assets.non_current[0].amount, dec!(60000));
        assert_eq!(report.difference, dec!(60000));
        assert!(!report.is_balanced);
    }

    #[test]
    fn test_balance_sheet_validates_revenue_expense_types() {
        let accounts = vec![
            Account::new("4000", "Revenue", "revenue", dec!(10000)),
            Account::new("5000", "Expense", "expense", dec!(5000)),
        ];

        let report = ReportService::generate_balance_sheet(&accounts, &[], None).unwrap();
        assert_eq!(report.assets.totals.total, dec!(0));
        assert_eq!(report.total_liabilities_and_equity, dec!(0));

        let bad = vec![Account::new("6000", "Odd", "income", dec!(1))];
        assert!(ReportService::generate_balance_sheet(&bad, &[], None).is_err());
    }

    #[test]
    fn test_empty_period_profit_and_loss() {
        let report = IncomeService::profit_and_loss(&[], &[], january(), false).unwrap();

        assert_eq!(report.revenue.total, dec!(0));
        assert_eq!(report.expenses.total, dec!(0));
        assert_eq!(report.net_income, dec!(0));
        assert!(report.revenue.items.is_empty());
        assert!(report.expenses.items.is_empty());

        let summary = IncomeService::summarize(&[], &january());
        assert!(summary.income_by_category.is_empty());
        assert!(summary.expenses_by_category.is_empty());
        assert_eq!(summary.net_profit, dec!(0));
    }

    #[test]
    fn test_date_range_validation() {
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(DateRange::new(later, earlier).is_err());
        assert!(DateRange::new(earlier, earlier).is_ok());
        assert!(DateRange::check_bounds(Some(later), None).is_ok());
        assert!(DateRange::check_bounds(Some(later), Some(earlier)).is_err());
        assert!(january().contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!january().contains(later));
    }
}
