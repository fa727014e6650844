//! Reconciliation error types.

use ledgerline_shared::AppError;
use ledgerline_shared::types::TransactionId;
use thiserror::Error;

/// Errors that can occur during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// A matched transaction does not belong to the account and period.
    #[error("Matched transaction {0} is not part of this reconciliation")]
    UnknownMatchedTransaction(TransactionId),
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        Self::Validation(err.to_string())
    }
}
