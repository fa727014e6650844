//! Settings error types.

use ledgerline_shared::AppError;
use thiserror::Error;

/// Errors raised when a settings update is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Fiscal year start month outside 1..=12.
    #[error("Fiscal year start month must be between 1 and 12, got {0}")]
    InvalidFiscalMonth(u32),

    /// Currency is not a three-letter code.
    #[error("Base currency must be a three-letter code, got {0:?}")]
    InvalidCurrency(String),

    /// Company name is blank.
    #[error("Company name must not be empty")]
    EmptyCompanyName,
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        Self::Validation(err.to_string())
    }
}
