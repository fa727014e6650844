//! Bank reconciliation.
//!
//! Computes a book balance for one bank account, adjusts it for uncleared
//! cheques and compares it with the statement balance. Persisting the result
//! is left to the caller: a successful reconciliation yields a
//! [`ReconciliationCommit`] to be applied as one batch.

mod error;

use std::collections::HashSet;

use chrono::NaiveDate;
use ledgerline_shared::ReconciliationBaseline;
use ledgerline_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cheques::IssuedCheque;
use crate::ledger::Transaction;

pub use error::ReconciliationError;

/// Reconciliation tolerance (one cent).
pub const RECONCILIATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reconciliation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationInput {
    /// Bank account being reconciled.
    pub bank_account_id: AccountId,
    /// First transaction date considered.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last transaction date considered.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Balance reported by the bank. `None` requests a preview.
    #[serde(default)]
    pub statement_balance: Option<Decimal>,
    /// Transactions the user ticked off against the statement.
    #[serde(default)]
    pub matched_transaction_ids: Vec<TransactionId>,
    /// Date recorded as `last_reconciled` on success.
    pub reconciliation_date: NaiveDate,
}

/// Writes to apply after a successful reconciliation, as one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationCommit {
    /// Account to update.
    pub account_id: AccountId,
    /// New `statement_balance`.
    pub statement_balance: Decimal,
    /// New `last_reconciled`.
    pub reconciliation_date: NaiveDate,
    /// Transactions to mark `reconciled = true`.
    pub matched_transaction_ids: Vec<TransactionId>,
}

/// Reconciliation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Bank account reconciled.
    pub bank_account_id: AccountId,
    /// Sum of signed transaction amounts.
    pub book_balance: Decimal,
    /// Sum of uncleared cheque amounts.
    pub uncleared_amount: Decimal,
    /// `book_balance - uncleared_amount`.
    pub adjusted_bank_balance: Decimal,
    /// Balance the difference was measured against.
    pub baseline: ReconciliationBaseline,
    /// Statement balance, if one was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_balance: Option<Decimal>,
    /// `statement_balance - baseline`, absent in a preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<Decimal>,
    /// `|difference| < 0.01`, absent in a preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reconciled: Option<bool>,
    /// Cheques counted as uncleared.
    pub uncleared_cheques: Vec<IssuedCheque>,
    /// Transactions considered.
    pub transactions: Vec<Transaction>,
    /// Writes to apply; present only when reconciled against a statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<ReconciliationCommit>,
}

/// Reconciliation computations.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Book balance of a set of transactions: income adds, expense subtracts.
    #[must_use]
    pub fn book_balance<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
        transactions.into_iter().map(Transaction::cash_effect).sum()
    }

    /// Reconciles the account's transactions and cheques.
    ///
    /// Cheques not in an uncleared status are ignored. `transactions` must
    /// already be restricted to the account and period.
    ///
    /// # Errors
    ///
    /// Returns `ReconciliationError::UnknownMatchedTransaction` if a matched
    /// id is not among `transactions`.
    pub fn reconcile(
        input: &ReconciliationInput,
        transactions: Vec<Transaction>,
        cheques: Vec<IssuedCheque>,
        baseline: ReconciliationBaseline,
    ) -> Result<ReconciliationReport, ReconciliationError> {
        let known: HashSet<TransactionId> = transactions.iter().map(|t| t.id).collect();
        if let Some(unknown) = input
            .matched_transaction_ids
            .iter()
            .find(|id| !known.contains(id))
        {
            return Err(ReconciliationError::UnknownMatchedTransaction(*unknown));
        }

        let uncleared_cheques: Vec<IssuedCheque> = cheques
            .into_iter()
            .filter(|c| c.status.is_uncleared())
            .collect();

        let book_balance = Self::book_balance(&transactions);
        let uncleared_amount: Decimal = uncleared_cheques.iter().map(|c| c.amount).sum();
        let adjusted_bank_balance = book_balance - uncleared_amount;

        let reference = match baseline {
            ReconciliationBaseline::BookBalance => book_balance,
            ReconciliationBaseline::AdjustedBankBalance => adjusted_bank_balance,
        };
        let difference = input.statement_balance.map(|s| s - reference);
        let is_reconciled = difference.map(|d| d.abs() < RECONCILIATION_TOLERANCE);

        let commit = match (input.statement_balance, is_reconciled) {
            (Some(statement_balance), Some(true)) => Some(ReconciliationCommit {
                account_id: input.bank_account_id,
                statement_balance,
                reconciliation_date: input.reconciliation_date,
                matched_transaction_ids: input.matched_transaction_ids.clone(),
            }),
            _ => None,
        };

        Ok(ReconciliationReport {
            bank_account_id: input.bank_account_id,
            book_balance,
            uncleared_amount,
            adjusted_bank_balance,
            baseline,
            statement_balance: input.statement_balance,
            difference,
            is_reconciled,
            uncleared_cheques,
            transactions,
            commit,
        })
    }
}

#[cfg(test)]
mod tests;
