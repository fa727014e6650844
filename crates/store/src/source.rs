//! Read and write sides of the persistence boundary.

use async_trait::async_trait;
use ledgerline_core::assets::FixedAsset;
use ledgerline_core::cheques::{IssuedCheque, ReceivedCheque};
use ledgerline_core::inventory::{ApplyMovement, InventoryItem, InventoryMovement};
use ledgerline_core::ledger::{Account, Transaction};
use ledgerline_core::reconciliation::ReconciliationCommit;
use ledgerline_core::settings::OrganizationSettings;

use crate::error::StoreError;
use crate::filter::{AccountFilter, AssetFilter, ChequeFilter, MovementFilter, TransactionFilter};

/// Supplies already-filtered record sets to the engine.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Transactions passing `filter`, sorted by date then creation time.
    async fn transactions(&self, filter: &TransactionFilter)
    -> Result<Vec<Transaction>, StoreError>;

    /// The `limit` most recently created transactions, newest first.
    async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, StoreError>;

    /// Accounts passing `filter`, sorted by code.
    async fn accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError>;

    /// Fixed assets passing `filter`, newest first.
    async fn fixed_assets(&self, filter: &AssetFilter) -> Result<Vec<FixedAsset>, StoreError>;

    /// Issued cheques passing `filter`, sorted by issue date.
    async fn issued_cheques(&self, filter: &ChequeFilter)
    -> Result<Vec<IssuedCheque>, StoreError>;

    /// Received cheques passing `filter`, sorted by received date.
    async fn received_cheques(
        &self,
        filter: &ChequeFilter,
    ) -> Result<Vec<ReceivedCheque>, StoreError>;

    /// All inventory items, sorted by name.
    async fn inventory_items(&self) -> Result<Vec<InventoryItem>, StoreError>;

    /// Stock movements passing `filter`, newest first.
    async fn movements(&self, filter: &MovementFilter)
    -> Result<Vec<InventoryMovement>, StoreError>;

    /// The settings record, if one has been saved.
    async fn settings(&self) -> Result<Option<OrganizationSettings>, StoreError>;
}

/// Applies commands emitted by the engine.
///
/// Each method is one atomic unit: either every write in it lands or none
/// does. A store that cannot guarantee this must report
/// [`StoreError::PartiallyApplied`] when it stops part-way.
#[async_trait]
pub trait LedgerSink: Send + Sync {
    /// Records the statement balance and reconciliation date on the account
    /// and marks every matched transaction reconciled.
    async fn apply_reconciliation(&self, commit: &ReconciliationCommit) -> Result<(), StoreError>;

    /// Inserts the movement and adjusts the item's quantity, returning the
    /// updated item.
    async fn apply_movement(&self, command: &ApplyMovement) -> Result<InventoryItem, StoreError>;

    /// Inserts or replaces the settings record under its well-known id.
    async fn upsert_settings(
        &self,
        settings: &OrganizationSettings,
    ) -> Result<OrganizationSettings, StoreError>;
}
