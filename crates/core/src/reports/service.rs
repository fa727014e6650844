//! Trial balance and balance sheet generation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::classification::classify;
use super::error::ReportError;
use super::types::{
    BALANCE_TOLERANCE, BalanceSheetLine, BalanceSheetReport, ClassifiedSection, EquitySection,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::assets::{FixedAsset, FixedAssetTotals};
use crate::ledger::{Account, AccountClassification, AccountType};

/// Line label for the gross cost of fixed assets.
pub const PPE_LINE: &str = "Property, Plant & Equipment";

/// Line label for accumulated depreciation.
pub const DEPRECIATION_LINE: &str = "Less: Accumulated Depreciation";

/// Service for generating statements from account balances.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from account balances.
    ///
    /// Only active accounts are listed, ordered by code. Each balance is
    /// placed in the debit or credit column according to its account type.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if an active account has an unknown type.
    pub fn generate_trial_balance(
        accounts: &[Account],
        as_of: Option<NaiveDate>,
    ) -> Result<TrialBalanceReport, ReportError> {
        let rows = Self::active_by_code(accounts)
            .into_iter()
            .map(|account| {
                let split = account.kind()?.normal_side().split(account.balance);
                Ok(TrialBalanceRow {
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    account_type: account.account_type.clone(),
                    debit: split.debit,
                    credit: split.credit,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let totals = TrialBalanceTotals {
            debit: rows.iter().map(|r| r.debit).sum(),
            credit: rows.iter().map(|r| r.credit).sum(),
        };
        let difference = totals.debit - totals.credit;

        Ok(TrialBalanceReport {
            as_of,
            accounts: rows,
            totals,
            is_balanced: difference.abs() < BALANCE_TOLERANCE,
            difference,
        })
    }

    /// Generates a balance sheet from account balances and the fixed asset register.
    ///
    /// Active fixed assets are folded into non-current assets as a gross
    /// PP&E line plus, when there is any, a negative accumulated depreciation
    /// line. Revenue and expense accounts are validated but not listed.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if an active account has an unknown type.
    pub fn generate_balance_sheet(
        accounts: &[Account],
        fixed_assets: &[FixedAsset],
        as_of: Option<NaiveDate>,
    ) -> Result<BalanceSheetReport, ReportError> {
        let mut assets = ClassifiedSection::default();
        let mut liabilities = ClassifiedSection::default();
        let mut equity = EquitySection::default();

        for account in Self::active_by_code(accounts) {
            let kind = account.kind()?;
            let line = BalanceSheetLine {
                account_id: Some(account.id),
                code: Some(account.code.clone()),
                name: account.name.clone(),
                amount: account.balance,
            };
            match kind {
                AccountType::Asset => Self::place(&mut assets, classify(account, kind), line),
                AccountType::Liability => {
                    Self::place(&mut liabilities, classify(account, kind), line);
                }
                AccountType::Equity => {
                    equity.total += line.amount;
                    equity.accounts.push(line);
                }
                AccountType::Revenue | AccountType::Expense => {}
            }
        }

        let active_assets: Vec<&FixedAsset> =
            fixed_assets.iter().filter(|a| a.is_active()).collect();
        if !active_assets.is_empty() {
            let totals = FixedAssetTotals::of(active_assets);
            Self::place(
                &mut assets,
                Some(AccountClassification::NonCurrent),
                Self::derived_line(PPE_LINE, totals.gross()),
            );
            if totals.depreciation > Decimal::ZERO {
                Self::place(
                    &mut assets,
                    Some(AccountClassification::NonCurrent),
                    Self::derived_line(DEPRECIATION_LINE, -totals.depreciation),
                );
            }
        }

        let total_liabilities_and_equity = liabilities.totals.total + equity.total;
        let difference = assets.totals.total - total_liabilities_and_equity;

        Ok(BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_liabilities_and_equity,
            is_balanced: difference.abs() < BALANCE_TOLERANCE,
            difference,
        })
    }

    fn active_by_code(accounts: &[Account]) -> Vec<&Account> {
        let mut active: Vec<&Account> = accounts.iter().filter(|a| a.is_active).collect();
        active.sort_by(|a, b| a.code.cmp(&b.code));
        active
    }

    fn derived_line(name: &str, amount: Decimal) -> BalanceSheetLine {
        BalanceSheetLine {
            account_id: None,
            code: None,
            name: name.to_string(),
            amount,
        }
    }

    fn place(
        section: &mut ClassifiedSection,
        classification: Option<AccountClassification>,
        line: BalanceSheetLine,
    ) {
        let amount = line.amount;
        match classification {
            Some(AccountClassification::Current) => {
                section.totals.current += amount;
                section.current.push(line);
            }
            Some(AccountClassification::NonCurrent) | None => {
                section.totals.non_current += amount;
                section.non_current.push(line);
            }
        }
        section.totals.total += amount;
    }
}
