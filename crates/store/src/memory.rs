//! In-memory record store.
//!
//! Holds a [`Snapshot`] behind a `tokio::sync::RwLock`. Reads clone out of a
//! shared guard; every command runs under one write guard and validates all
//! of its targets before touching anything, so commands are atomic.

use async_trait::async_trait;
use ledgerline_core::assets::FixedAsset;
use ledgerline_core::cheques::{IssuedCheque, ReceivedCheque};
use ledgerline_core::inventory::{ApplyMovement, InventoryItem, InventoryMovement};
use ledgerline_core::ledger::{Account, Transaction};
use ledgerline_core::reconciliation::ReconciliationCommit;
use ledgerline_core::settings::OrganizationSettings;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::filter::{AccountFilter, AssetFilter, ChequeFilter, MovementFilter, TransactionFilter};
use crate::source::{LedgerSink, LedgerSource};

/// Every record the store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Chart of accounts.
    pub accounts: Vec<Account>,
    /// Transaction log.
    pub transactions: Vec<Transaction>,
    /// Fixed asset register.
    pub fixed_assets: Vec<FixedAsset>,
    /// Issued cheque register.
    pub issued_cheques: Vec<IssuedCheque>,
    /// Received cheque register.
    pub received_cheques: Vec<ReceivedCheque>,
    /// Inventory items.
    pub inventory_items: Vec<InventoryItem>,
    /// Stock movement log.
    pub movements: Vec<InventoryMovement>,
    /// Organization settings.
    pub settings: Option<OrganizationSettings>,
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, which only happens for
    /// non-string map keys.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// An in-memory [`LedgerSource`] and [`LedgerSink`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// A copy of the current contents.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl LedgerSource for MemoryStore {
    async fn transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(rows)
    }

    async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        let mut rows = state.transactions.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Account> = state
            .accounts
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rows)
    }

    async fn fixed_assets(&self, filter: &AssetFilter) -> Result<Vec<FixedAsset>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<FixedAsset> = state
            .fixed_assets
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn issued_cheques(
        &self,
        filter: &ChequeFilter,
    ) -> Result<Vec<IssuedCheque>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<IssuedCheque> = state
            .issued_cheques
            .iter()
            .filter(|c| filter.matches_issued(c))
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.issue_date);
        Ok(rows)
    }

    async fn received_cheques(
        &self,
        filter: &ChequeFilter,
    ) -> Result<Vec<ReceivedCheque>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<ReceivedCheque> = state
            .received_cheques
            .iter()
            .filter(|c| filter.matches_received(c))
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.received_date);
        Ok(rows)
    }

    async fn inventory_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.state.read().await;
        let mut rows = state.inventory_items.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn movements(
        &self,
        filter: &MovementFilter,
    ) -> Result<Vec<InventoryMovement>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<InventoryMovement> = state
            .movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn settings(&self) -> Result<Option<OrganizationSettings>, StoreError> {
        Ok(self.state.read().await.settings.clone())
    }
}

#[async_trait]
impl LedgerSink for MemoryStore {
    async fn apply_reconciliation(&self, commit: &ReconciliationCommit) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        let account_idx = state
            .accounts
            .iter()
            .position(|a| a.id == commit.account_id)
            .ok_or_else(|| StoreError::not_found("Account", commit.account_id))?;

        let mut txn_indices = Vec::with_capacity(commit.matched_transaction_ids.len());
        for id in &commit.matched_transaction_ids {
            let idx = state
                .transactions
                .iter()
                .position(|t| t.id == *id)
                .ok_or_else(|| StoreError::not_found("Transaction", id))?;
            txn_indices.push(idx);
        }

        let account = &mut state.accounts[account_idx];
        account.statement_balance = Some(commit.statement_balance);
        account.last_reconciled = Some(commit.reconciliation_date);
        for idx in txn_indices {
            state.transactions[idx].reconciled = true;
        }

        debug!(
            account_id = %commit.account_id,
            matched = commit.matched_transaction_ids.len(),
            "Applied reconciliation"
        );
        Ok(())
    }

    async fn apply_movement(&self, command: &ApplyMovement) -> Result<InventoryItem, StoreError> {
        let mut state = self.state.write().await;

        let item_id = command.movement.item_id;
        let idx = state
            .inventory_items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StoreError::not_found("Inventory item", item_id))?;

        let updated = command
            .apply_to(&state.inventory_items[idx])
            .map_err(|e| StoreError::Conflict(e.to_string()))?;
        state.inventory_items[idx] = updated.clone();
        state.movements.push(command.movement.clone());

        debug!(item_id = %item_id, delta = %command.delta, "Applied stock movement");
        Ok(updated)
    }

    async fn upsert_settings(
        &self,
        settings: &OrganizationSettings,
    ) -> Result<OrganizationSettings, StoreError> {
        let mut stored = settings.clone();
        stored.id = OrganizationSettings::SINGLETON_ID;
        self.state.write().await.settings = Some(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
