//! Operation parameters.
//!
//! Required parameters are modelled as `Option` so that a missing value is
//! reported as a validation error instead of a deserialization failure.

use chrono::NaiveDate;
use ledgerline_core::cheques::ChequeStatus;
use ledgerline_core::ledger::DisplayOrder;
use ledgerline_core::reconciliation::ReconciliationInput;
use ledgerline_core::reports::DateRange;
use ledgerline_shared::types::{AccountId, TransactionId};
use ledgerline_shared::{AppError, AppResult};
use ledgerline_store::{ChequeFilter, TransactionFilter};
use rust_decimal::Decimal;
use serde::Deserialize;

fn required<T>(value: Option<T>, name: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    DateRange::check_bounds(start, end).map_err(AppError::from)
}

// ============================================================================
// Ledger queries
// ============================================================================

/// Parameters for the general ledger and journal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    /// Earliest transaction date.
    pub start_date: Option<NaiveDate>,
    /// Latest transaction date.
    pub end_date: Option<NaiveDate>,
    /// Restrict to one account.
    pub account_id: Option<AccountId>,
}

impl LedgerQuery {
    pub(crate) fn filter(&self) -> AppResult<TransactionFilter> {
        bounds(self.start_date, self.end_date)?;
        let filter = TransactionFilter::default().between(self.start_date, self.end_date);
        Ok(match self.account_id {
            Some(id) => filter.for_account(id),
            None => filter,
        })
    }
}

/// Parameters for point-in-time reports (trial balance, balance sheet).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsOfQuery {
    /// Date echoed in the report. Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Parameters for period reports. Both dates are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    /// First day of the period.
    pub start_date: Option<NaiveDate>,
    /// Last day of the period.
    pub end_date: Option<NaiveDate>,
}

impl PeriodQuery {
    /// A period query over `start..=end`.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub(crate) fn range(&self) -> AppResult<DateRange> {
        let start = required(self.start_date, "start_date")?;
        let end = required(self.end_date, "end_date")?;
        Ok(DateRange::new(start, end)?)
    }
}

/// Parameters for asset performance. The dates are only echoed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetPerformanceQuery {
    /// Echoed start date.
    pub start_date: Option<NaiveDate>,
    /// Echoed end date.
    pub end_date: Option<NaiveDate>,
}

// ============================================================================
// Books and cheques
// ============================================================================

/// Parameters for the cash book and bank book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Earliest entry date.
    pub start_date: Option<NaiveDate>,
    /// Latest entry date.
    pub end_date: Option<NaiveDate>,
    /// Restrict to one bank account.
    pub bank_account_id: Option<AccountId>,
    /// Balance before the first entry. Defaults to zero.
    pub opening_balance: Option<Decimal>,
    /// Presentation order. Defaults to newest first.
    pub order: Option<DisplayOrder>,
}

impl BookQuery {
    pub(crate) fn transaction_filter(&self) -> AppResult<TransactionFilter> {
        bounds(self.start_date, self.end_date)?;
        let filter = TransactionFilter::default().between(self.start_date, self.end_date);
        Ok(match self.bank_account_id {
            Some(id) => filter.for_account(id),
            None => filter,
        })
    }

    pub(crate) fn cheque_filter(&self) -> ChequeFilter {
        ChequeFilter {
            bank_account_id: self.bank_account_id,
            ..ChequeFilter::default()
        }
        .between(self.start_date, self.end_date)
    }
}

/// Parameters for the cheque registers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChequeQuery {
    /// Restrict to one bank account.
    pub bank_account_id: Option<AccountId>,
    /// Restrict to one status.
    pub status: Option<ChequeStatus>,
    /// Earliest issue/received date.
    pub start_date: Option<NaiveDate>,
    /// Latest issue/received date.
    pub end_date: Option<NaiveDate>,
}

impl ChequeQuery {
    pub(crate) fn filter(&self) -> AppResult<ChequeFilter> {
        bounds(self.start_date, self.end_date)?;
        Ok(ChequeFilter {
            bank_account_id: self.bank_account_id,
            statuses: self.status.into_iter().collect(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

/// Parameters for a bank reconciliation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconciliationQuery {
    /// Bank account to reconcile. Required.
    pub bank_account_id: Option<AccountId>,
    /// Earliest transaction date.
    pub start_date: Option<NaiveDate>,
    /// Latest transaction date. When a statement balance is given and this
    /// is absent, the reconciliation date is used.
    pub end_date: Option<NaiveDate>,
    /// Balance reported by the bank. Absent for a preview.
    pub statement_balance: Option<Decimal>,
    /// Transactions ticked off against the statement.
    #[serde(default)]
    pub matched_transaction_ids: Vec<TransactionId>,
    /// Date recorded on the account. Defaults to `today`.
    pub reconciliation_date: Option<NaiveDate>,
}

impl ReconciliationQuery {
    /// A preview query for one account.
    #[must_use]
    pub fn preview(bank_account_id: AccountId) -> Self {
        Self {
            bank_account_id: Some(bank_account_id),
            ..Self::default()
        }
    }

    pub(crate) fn into_input(self, today: NaiveDate) -> AppResult<ReconciliationInput> {
        let bank_account_id = required(self.bank_account_id, "bank_account_id")?;
        let reconciliation_date = self.reconciliation_date.unwrap_or(today);
        let end_date = match (self.end_date, self.statement_balance) {
            (Some(end), _) => Some(end),
            (None, Some(_)) => Some(reconciliation_date),
            (None, None) => None,
        };
        bounds(self.start_date, end_date)?;

        Ok(ReconciliationInput {
            bank_account_id,
            start_date: self.start_date,
            end_date,
            statement_balance: self.statement_balance,
            matched_transaction_ids: self.matched_transaction_ids,
            reconciliation_date,
        })
    }
}
