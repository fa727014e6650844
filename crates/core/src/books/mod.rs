//! Cash book and bank book.
//!
//! Both books accumulate chronologically from an opening balance. The bank
//! book also carries issued cheques, always as payments, merged by date with
//! transactions (transactions first on equal dates). Transactions whose
//! account is not supplied are left out of both books.

use std::collections::HashMap;

use chrono::NaiveDate;
use ledgerline_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cheques::IssuedCheque;
use crate::ledger::{
    Account, AccountRef, Balanced, DisplayOrder, Transaction, dated_running_balances,
};

/// What a book line was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum BookItem {
    /// A ledger transaction with its account.
    Transaction(BookTransaction),
    /// An issued cheque.
    Cheque(IssuedCheque),
}

impl BookItem {
    /// Business date of the item.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Transaction(t) => t.transaction.date,
            Self::Cheque(c) => c.issue_date,
        }
    }
}

/// A transaction tagged with the account it was posted against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTransaction {
    /// The transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Its account.
    pub account: AccountRef,
}

/// A book line with receipt/payment columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Source record.
    #[serde(flatten)]
    pub item: BookItem,
    /// Money in.
    pub receipt: Decimal,
    /// Money out.
    pub payment: Decimal,
}

impl BookEntry {
    fn from_item(item: BookItem) -> Self {
        let (receipt, payment) = match &item {
            BookItem::Transaction(t) if t.transaction.is_income() => {
                (t.transaction.amount, Decimal::ZERO)
            }
            BookItem::Transaction(t) => (Decimal::ZERO, t.transaction.amount),
            BookItem::Cheque(c) => (Decimal::ZERO, c.amount),
        };
        Self {
            item,
            receipt,
            payment,
        }
    }

    /// Signed effect on the book balance.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.receipt - self.payment
    }
}

/// A cash or bank book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Balance before the first entry.
    pub opening_balance: Decimal,
    /// Sum of receipts.
    pub total_receipts: Decimal,
    /// Sum of payments.
    pub total_payments: Decimal,
    /// Balance after the last entry.
    pub closing_balance: Decimal,
    /// Entries with running balances, in the requested display order.
    pub entries: Vec<Balanced<BookEntry>>,
}

/// Cash book and bank book construction.
pub struct BookService;

impl BookService {
    /// Builds a cash book from transactions.
    #[must_use]
    pub fn cash_book(
        transactions: Vec<Transaction>,
        accounts: &[Account],
        opening_balance: Decimal,
        order: DisplayOrder,
    ) -> Book {
        let entries = Self::joined(transactions, accounts)
            .map(BookEntry::from_item)
            .collect();
        Self::build(entries, opening_balance, order)
    }

    /// Builds a bank book from transactions and issued cheques.
    #[must_use]
    pub fn bank_book(
        transactions: Vec<Transaction>,
        accounts: &[Account],
        cheques: Vec<IssuedCheque>,
        opening_balance: Decimal,
        order: DisplayOrder,
    ) -> Book {
        let entries = Self::joined(transactions, accounts)
            .chain(cheques.into_iter().map(BookItem::Cheque))
            .map(BookEntry::from_item)
            .collect();
        Self::build(entries, opening_balance, order)
    }

    fn joined(
        transactions: Vec<Transaction>,
        accounts: &[Account],
    ) -> impl Iterator<Item = BookItem> {
        let lookup: HashMap<AccountId, AccountRef> =
            accounts.iter().map(|a| (a.id, a.reference())).collect();
        transactions.into_iter().filter_map(move |transaction| {
            let account = lookup.get(&transaction.account_id)?.clone();
            Some(BookItem::Transaction(BookTransaction {
                transaction,
                account,
            }))
        })
    }

    fn build(entries: Vec<BookEntry>, opening_balance: Decimal, order: DisplayOrder) -> Book {
        let total_receipts: Decimal = entries.iter().map(|e| e.receipt).sum();
        let total_payments: Decimal = entries.iter().map(|e| e.payment).sum();
        let entries = dated_running_balances(
            entries,
            opening_balance,
            |e| e.item.date(),
            BookEntry::net,
            order,
        );

        Book {
            opening_balance,
            total_receipts,
            total_payments,
            closing_balance: opening_balance + total_receipts - total_payments,
            entries,
        }
    }
}
