//! Ledger error types.

use ledgerline_shared::AppError;
use thiserror::Error;

/// Errors that can occur while interpreting ledger records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Account type is not one of asset, liability, equity, revenue, expense.
    #[error("Unclassified account type: {0}")]
    UnclassifiedAccountType(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnclassifiedAccountType(t) => Self::UnclassifiedAccountType(t),
        }
    }
}
