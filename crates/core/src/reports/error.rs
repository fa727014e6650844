//! Report error types.

use chrono::NaiveDate;
use ledgerline_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
///
/// Out-of-balance ledgers are not errors; they are reported through
/// `is_balanced` and `difference`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A record could not be interpreted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            ReportError::Ledger(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_app_error() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err: AppError = ReportError::InvalidDateRange { start, end }.into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: AppError =
            ReportError::from(LedgerError::UnclassifiedAccountType("x".into())).into();
        assert_eq!(err.error_code(), "UNCLASSIFIED_ACCOUNT_TYPE");
    }
}
