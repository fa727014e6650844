//! Debit/credit sign conventions.
//!
//! - Asset/Expense: debit-normal
//! - Liability/Equity/Revenue: credit-normal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::AccountType;

/// The side on which an account type conventionally carries its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

/// A balance split into trial balance columns. One side is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

impl AccountType {
    /// Returns the normal balance side of this account type.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalSide::Credit,
        }
    }
}

impl NormalSide {
    /// Resolves the normal side of a stored account type string.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnclassifiedAccountType` for unknown types.
    pub fn of(account_type: &str) -> Result<Self, LedgerError> {
        account_type.parse::<AccountType>().map(AccountType::normal_side)
    }

    /// Places a signed balance in the debit or credit column.
    ///
    /// A non-negative balance lands on the normal side; a negative balance
    /// lands, as its absolute value, on the opposite side.
    #[must_use]
    pub fn split(self, balance: Decimal) -> DebitCredit {
        let on_normal_side = !balance.is_sign_negative() || balance.is_zero();
        let amount = balance.abs();
        match (self, on_normal_side) {
            (Self::Debit, true) | (Self::Credit, false) => DebitCredit {
                debit: amount,
                credit: Decimal::ZERO,
            },
            (Self::Credit, true) | (Self::Debit, false) => DebitCredit {
                debit: Decimal::ZERO,
                credit: amount,
            },
        }
    }
}
