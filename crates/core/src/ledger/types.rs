//! Ledger record types supplied by the persistence boundary.
//!
//! Transactions are single-sided: each one carries an `income`/`expense` tag
//! instead of a debit/credit pair. Accounts carry an externally maintained
//! balance that the engine only reads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ledgerline_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Transaction direction tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in. Reported as a credit in the journal.
    Income,
    /// Money out. Reported as a debit in the journal.
    Expense,
}

/// A financial transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Business date.
    pub date: NaiveDate,
    /// Amount (non-negative).
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category label, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The account this transaction was posted against.
    pub account_id: AccountId,
    /// Whether the transaction has been matched in a bank reconciliation.
    #[serde(default)]
    pub reconciled: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction stamped at midnight UTC of its business date.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        date: NaiveDate,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            amount,
            transaction_type,
            category: None,
            description: None,
            account_id,
            reconciled: false,
            created_at: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Creates an income transaction.
    #[must_use]
    pub fn income(account_id: AccountId, date: NaiveDate, amount: Decimal) -> Self {
        Self::new(account_id, date, amount, TransactionType::Income)
    }

    /// Creates an expense transaction.
    #[must_use]
    pub fn expense(account_id: AccountId, date: NaiveDate, amount: Decimal) -> Self {
        Self::new(account_id, date, amount, TransactionType::Expense)
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true for income transactions.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Cash effect of the transaction: `+amount` for income, `-amount` for expense.
    #[must_use]
    pub fn cash_effect(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Journal columns `(debit, credit)` under the one-sided entry model.
    ///
    /// Expense debits, income credits, whatever the account's own normal side.
    #[must_use]
    pub fn journal_columns(&self) -> (Decimal, Decimal) {
        match self.transaction_type {
            TransactionType::Expense => (self.amount, Decimal::ZERO),
            TransactionType::Income => (Decimal::ZERO, self.amount),
        }
    }
}

/// The five account types of the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// What the business owns.
    Asset,
    /// What the business owes.
    Liability,
    /// Owner's interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// All known account types.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Lowercase name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::UnclassifiedAccountType(s.to_string())),
        }
    }
}

/// Explicit current/non-current tag for balance sheet placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClassification {
    /// Realised or settled within the operating cycle.
    Current,
    /// Everything else.
    NonCurrent,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code (sort key for reports).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Raw account type as stored; parsed with [`Account::kind`].
    #[serde(rename = "type")]
    pub account_type: String,
    /// Externally maintained signed balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Explicit current/non-current tag. `None` for legacy accounts.
    #[serde(default)]
    pub classification: Option<AccountClassification>,
    /// Last reconciled bank statement balance.
    #[serde(default)]
    pub statement_balance: Option<Decimal>,
    /// Date of the last successful reconciliation.
    #[serde(default)]
    pub last_reconciled: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Account {
    /// Creates an active, unclassified account.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            account_type: account_type.into(),
            balance,
            is_active: true,
            classification: None,
            statement_balance: None,
            last_reconciled: None,
        }
    }

    /// Sets the explicit classification.
    #[must_use]
    pub fn with_classification(mut self, classification: AccountClassification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Marks the account inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Parses the stored account type.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnclassifiedAccountType` for unknown types.
    pub fn kind(&self) -> Result<AccountType, LedgerError> {
        self.account_type.parse()
    }

    /// Short reference used to annotate ledger lines.
    #[must_use]
    pub fn reference(&self) -> AccountRef {
        AccountRef {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            account_type: self.account_type.clone(),
        }
    }
}

/// Account details attached to journal and ledger lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type as stored.
    #[serde(rename = "type")]
    pub account_type: String,
}
