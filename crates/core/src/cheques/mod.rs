//! Issued and received cheque registers.

use chrono::NaiveDate;
use ledgerline_shared::types::{AccountId, ChequeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cheque lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChequeStatus {
    /// Written and handed over.
    Issued,
    /// Presented to the bank, not yet settled.
    Presented,
    /// Settled by the bank.
    Cleared,
    /// Returned unpaid.
    Bounced,
    /// Voided before presentation.
    Cancelled,
    /// Received cheque paid into the bank.
    Deposited,
}

impl ChequeStatus {
    /// Statuses counted as uncleared during reconciliation.
    pub const UNCLEARED: [Self; 2] = [Self::Issued, Self::Presented];

    /// Returns true if the bank has not yet settled the cheque.
    #[must_use]
    pub fn is_uncleared(self) -> bool {
        Self::UNCLEARED.contains(&self)
    }
}

/// A cheque written by the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCheque {
    /// Cheque ID.
    pub id: ChequeId,
    /// Printed cheque number.
    #[serde(default)]
    pub cheque_number: Option<String>,
    /// Payee name.
    #[serde(default)]
    pub payee: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Date the cheque was issued.
    pub issue_date: NaiveDate,
    /// Current status.
    pub status: ChequeStatus,
    /// Bank account the cheque is drawn on.
    pub bank_account_id: AccountId,
}

impl IssuedCheque {
    /// Creates a cheque in `issued` status.
    #[must_use]
    pub fn new(bank_account_id: AccountId, issue_date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: ChequeId::new(),
            cheque_number: None,
            payee: None,
            amount,
            issue_date,
            status: ChequeStatus::Issued,
            bank_account_id,
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: ChequeStatus) -> Self {
        self.status = status;
        self
    }
}

/// A cheque received from a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedCheque {
    /// Cheque ID.
    pub id: ChequeId,
    /// Printed cheque number.
    #[serde(default)]
    pub cheque_number: Option<String>,
    /// Drawer name.
    #[serde(default)]
    pub drawer: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Date the cheque was received.
    pub received_date: NaiveDate,
    /// Current status.
    pub status: ChequeStatus,
    /// Bank account the cheque is (or will be) deposited into.
    #[serde(default)]
    pub bank_account_id: Option<AccountId>,
}
