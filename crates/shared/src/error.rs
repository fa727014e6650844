//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Balance mismatches are deliberately absent: an out-of-balance ledger is
/// reported through `is_balanced`/`difference`, never raised.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request parameter.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Account type outside asset/liability/equity/revenue/expense.
    #[error("Unclassified account type: {0}")]
    UnclassifiedAccountType(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., concurrent modification).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A collaborator query failed.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// A collaborator query did not answer in time.
    #[error("Upstream timed out: {0}")]
    Timeout(String),

    /// A write batch was only partially applied.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::UnclassifiedAccountType(_) => 422,
            Self::UpstreamFetch(_) => 502,
            Self::Timeout(_) => 504,
            Self::InconsistentState(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnclassifiedAccountType(_) => "UNCLASSIFIED_ACCOUNT_TYPE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::UpstreamFetch(_) => "UPSTREAM_FETCH_ERROR",
            Self::Timeout(_) => "UPSTREAM_TIMEOUT",
            Self::InconsistentState(_) => "INCONSISTENT_STATE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Conflict(_) | Self::InconsistentState(_)
        )
    }
}
