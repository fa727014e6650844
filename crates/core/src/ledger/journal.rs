//! Journal formatting and general ledger grouping.

use std::collections::HashMap;

use ledgerline_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::{Balanced, DisplayOrder, dated_running_balances};
use super::types::{Account, AccountRef, Transaction};

/// A transaction rendered as a journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// The underlying transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The account the transaction was posted against.
    pub account: AccountRef,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

/// A general ledger line: a journal line plus the per-account running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The journal line.
    #[serde(flatten)]
    pub line: JournalLine,
    /// Account balance after this line (debit minus credit, cumulative).
    pub balance: Decimal,
}

/// Journal and general ledger formatting.
pub struct JournalService;

impl JournalService {
    /// Formats transactions as journal lines, newest first by date and then
    /// by creation time.
    ///
    /// Transactions whose account is not in `accounts` are omitted.
    #[must_use]
    pub fn journal(transactions: Vec<Transaction>, accounts: &[Account]) -> Vec<JournalLine> {
        let lookup = Self::account_lookup(accounts);
        let mut lines: Vec<JournalLine> = transactions
            .into_iter()
            .filter_map(|t| Self::to_line(t, &lookup))
            .collect();
        lines.sort_by(|a, b| {
            b.transaction
                .date
                .cmp(&a.transaction.date)
                .then(b.transaction.created_at.cmp(&a.transaction.created_at))
        });
        lines
    }

    /// Builds the general ledger.
    ///
    /// Lines are grouped by account in order of first appearance; within a
    /// group the input order is kept for equal dates. Each group accumulates
    /// `debit - credit` chronologically from zero. Transactions whose account
    /// is not in `accounts` are omitted.
    #[must_use]
    pub fn general_ledger(transactions: Vec<Transaction>, accounts: &[Account]) -> Vec<LedgerLine> {
        let lookup = Self::account_lookup(accounts);

        let mut group_index: HashMap<AccountId, usize> = HashMap::new();
        let mut groups: Vec<Vec<JournalLine>> = Vec::new();
        for line in transactions
            .into_iter()
            .filter_map(|t| Self::to_line(t, &lookup))
        {
            let idx = *group_index
                .entry(line.transaction.account_id)
                .or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
            groups[idx].push(line);
        }

        groups
            .into_iter()
            .flat_map(|group| {
                dated_running_balances(
                    group,
                    Decimal::ZERO,
                    |l| l.transaction.date,
                    |l| l.debit - l.credit,
                    DisplayOrder::Chronological,
                )
            })
            .map(|Balanced { entry, balance }| LedgerLine {
                line: entry,
                balance,
            })
            .collect()
    }

    fn account_lookup(accounts: &[Account]) -> HashMap<AccountId, &Account> {
        accounts.iter().map(|a| (a.id, a)).collect()
    }

    fn to_line(transaction: Transaction, lookup: &HashMap<AccountId, &Account>) -> Option<JournalLine> {
        let account = lookup.get(&transaction.account_id)?.reference();
        let (debit, credit) = transaction.journal_columns();
        Some(JournalLine {
            transaction,
            account,
            debit,
            credit,
        })
    }
}
