//! Query filters passed to a record source.
//!
//! Every filter also exposes `matches`, so in-memory sources and tests apply
//! exactly the same predicate a database query would.

use chrono::NaiveDate;
use ledgerline_core::assets::FixedAsset;
use ledgerline_core::cheques::{ChequeStatus, IssuedCheque, ReceivedCheque};
use ledgerline_core::inventory::{InventoryMovement, MovementType};
use ledgerline_core::ledger::{Account, Transaction};
use ledgerline_shared::types::{AccountId, InventoryItemId};
use serde::{Deserialize, Serialize};

fn within(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

/// Transaction filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Only transactions posted against this account.
    pub account_id: Option<AccountId>,
    /// Earliest date (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Latest date (inclusive).
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Restricts to one account.
    #[must_use]
    pub fn for_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Restricts to a date window. Either bound may be open.
    #[must_use]
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Returns true if the transaction passes the filter.
    #[must_use]
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.account_id.is_none_or(|id| txn.account_id == id)
            && within(txn.date, self.start_date, self.end_date)
    }
}

/// Account filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Only active accounts.
    pub active_only: bool,
}

impl AccountFilter {
    /// Active accounts only.
    #[must_use]
    pub const fn active() -> Self {
        Self { active_only: true }
    }

    /// Returns true if the account passes the filter.
    #[must_use]
    pub fn matches(&self, account: &Account) -> bool {
        !self.active_only || account.is_active
    }
}

/// Fixed asset filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFilter {
    /// Only assets in `Active` status.
    pub active_only: bool,
}

impl AssetFilter {
    /// Active assets only.
    #[must_use]
    pub const fn active() -> Self {
        Self { active_only: true }
    }

    /// Returns true if the asset passes the filter.
    #[must_use]
    pub fn matches(&self, asset: &FixedAsset) -> bool {
        !self.active_only || asset.is_active()
    }
}

/// Cheque filter, shared by the issued and received registers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeFilter {
    /// Only cheques on this bank account.
    pub bank_account_id: Option<AccountId>,
    /// Only these statuses. Empty means any status.
    pub statuses: Vec<ChequeStatus>,
    /// Earliest issue/received date (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Latest issue/received date (inclusive).
    pub end_date: Option<NaiveDate>,
}

impl ChequeFilter {
    /// Uncleared cheques on one bank account.
    #[must_use]
    pub fn uncleared(bank_account_id: AccountId) -> Self {
        Self {
            bank_account_id: Some(bank_account_id),
            statuses: ChequeStatus::UNCLEARED.to_vec(),
            ..Self::default()
        }
    }

    /// Restricts to a date window. Either bound may be open.
    #[must_use]
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    fn status_matches(&self, status: ChequeStatus) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }

    /// Returns true if the issued cheque passes the filter.
    #[must_use]
    pub fn matches_issued(&self, cheque: &IssuedCheque) -> bool {
        self.bank_account_id
            .is_none_or(|id| cheque.bank_account_id == id)
            && self.status_matches(cheque.status)
            && within(cheque.issue_date, self.start_date, self.end_date)
    }

    /// Returns true if the received cheque passes the filter.
    #[must_use]
    pub fn matches_received(&self, cheque: &ReceivedCheque) -> bool {
        self.bank_account_id
            .is_none_or(|id| cheque.bank_account_id == Some(id))
            && self.status_matches(cheque.status)
            && within(cheque.received_date, self.start_date, self.end_date)
    }
}

/// Stock movement filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    /// Only movements of this item.
    pub item_id: Option<InventoryItemId>,
    /// Only movements of this type.
    pub movement_type: Option<MovementType>,
}

impl MovementFilter {
    /// Returns true if the movement passes the filter.
    #[must_use]
    pub fn matches(&self, movement: &InventoryMovement) -> bool {
        self.item_id.is_none_or(|id| movement.item_id == id)
            && self
                .movement_type
                .is_none_or(|kind| movement.movement_type == kind)
    }
}
