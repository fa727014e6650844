//! Store error types.

use ledgerline_shared::AppError;
use thiserror::Error;

/// Errors reported by a record source or command sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached or the query failed.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A command targeted a record that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record kind.
        entity: &'static str,
        /// Record identifier.
        id: String,
    },

    /// A concurrent writer got there first.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write batch stopped part-way. The caller must treat the affected
    /// records as inconsistent until the batch is re-applied.
    #[error("Batch partially applied: {0}")]
    PartiallyApplied(String),
}

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::UpstreamFetch(msg),
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::PartiallyApplied(msg) => Self::InconsistentState(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let cases = [
            (StoreError::Unavailable("db down".into()), "UPSTREAM_FETCH_ERROR"),
            (StoreError::not_found("Account", 7), "NOT_FOUND"),
            (StoreError::Conflict("stale".into()), "CONFLICT"),
            (StoreError::PartiallyApplied("half".into()), "INCONSISTENT_STATE"),
        ];
        for (err, code) in cases {
            assert_eq!(AppError::from(err).error_code(), code);
        }
    }

    #[test]
    fn test_unavailable_keeps_message() {
        let err = AppError::from(StoreError::Unavailable("connection refused".into()));
        assert!(err.to_string().contains("connection refused"));
    }
}
