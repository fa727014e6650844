//! Ledger primitives.
//!
//! This module implements the leaf computations of the engine:
//! - Ledger record types (transactions, accounts)
//! - The debit/credit sign convention per account type
//! - Chronological running balances
//! - Journal formatting and general ledger grouping

pub mod balance;
pub mod error;
pub mod journal;
pub mod sign;
pub mod types;

pub use balance::{Balanced, DisplayOrder, RunningBalance, dated_running_balances, running_balances};
pub use error::LedgerError;
pub use journal::{JournalLine, JournalService, LedgerLine};
pub use sign::{DebitCredit, NormalSide};
pub use types::{
    Account, AccountClassification, AccountRef, AccountType, Transaction, TransactionType,
};
