//! Shared fixtures for engine tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerline_core::assets::FixedAsset;
use ledgerline_core::cheques::{IssuedCheque, ReceivedCheque};
use ledgerline_core::inventory::{ApplyMovement, InventoryItem, InventoryMovement};
use ledgerline_core::ledger::{Account, Transaction};
use ledgerline_core::reconciliation::ReconciliationCommit;
use ledgerline_core::settings::OrganizationSettings;
use ledgerline_service::ReportEngine;
use ledgerline_shared::EngineConfig;
use ledgerline_store::{
    AccountFilter, AssetFilter, ChequeFilter, LedgerSink, LedgerSource, MemoryStore,
    MovementFilter, Snapshot, StoreError, TransactionFilter,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn engine(snapshot: Snapshot) -> (ReportEngine<MemoryStore>, Arc<MemoryStore>) {
    engine_with(snapshot, EngineConfig::default())
}

pub fn engine_with(
    snapshot: Snapshot,
    config: EngineConfig,
) -> (ReportEngine<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::from_snapshot(snapshot));
    (ReportEngine::new(Arc::clone(&store), config), store)
}

/// Fault injected by [`FaultyStore`].
#[derive(Debug, Clone)]
pub enum Fault {
    /// Account fetches sleep for this long.
    SlowAccounts(Duration),
    /// Transaction fetches fail with this message.
    TransactionsUnavailable(&'static str),
    /// Reconciliation commits stop part-way.
    PartialReconciliation,
}

/// A [`MemoryStore`] wrapper that misbehaves in one specific way.
#[derive(Debug)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fault: Fault,
}

impl FaultyStore {
    pub fn engine(snapshot: Snapshot, fault: Fault, timeout_ms: u64) -> ReportEngine<Self> {
        let store = Self {
            inner: MemoryStore::from_snapshot(snapshot),
            fault,
        };
        let config = EngineConfig {
            fetch_timeout_ms: timeout_ms,
            ..EngineConfig::default()
        };
        ReportEngine::new(Arc::new(store), config)
    }
}

#[async_trait]
impl LedgerSource for FaultyStore {
    async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        if let Fault::TransactionsUnavailable(msg) = &self.fault {
            return Err(StoreError::Unavailable((*msg).to_string()));
        }
        self.inner.transactions(filter).await
    }

    async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, StoreError> {
        if let Fault::TransactionsUnavailable(msg) = &self.fault {
            return Err(StoreError::Unavailable((*msg).to_string()));
        }
        self.inner.recent_transactions(limit).await
    }

    async fn accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError> {
        if let Fault::SlowAccounts(delay) = &self.fault {
            tokio::time::sleep(*delay).await;
        }
        self.inner.accounts(filter).await
    }

    async fn fixed_assets(&self, filter: &AssetFilter) -> Result<Vec<FixedAsset>, StoreError> {
        self.inner.fixed_assets(filter).await
    }

    async fn issued_cheques(&self, filter: &ChequeFilter) -> Result<Vec<IssuedCheque>, StoreError> {
        self.inner.issued_cheques(filter).await
    }

    async fn received_cheques(
        &self,
        filter: &ChequeFilter,
    ) -> Result<Vec<ReceivedCheque>, StoreError> {
        self.inner.received_cheques(filter).await
    }

    async fn inventory_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.inner.inventory_items().await
    }

    async fn movements(&self, filter: &MovementFilter) -> Result<Vec<InventoryMovement>, StoreError> {
        self.inner.movements(filter).await
    }

    async fn settings(&self) -> Result<Option<OrganizationSettings>, StoreError> {
        self.inner.settings().await
    }
}

#[async_trait]
impl LedgerSink for FaultyStore {
    async fn apply_reconciliation(&self, commit: &ReconciliationCommit) -> Result<(), StoreError> {
        if matches!(self.fault, Fault::PartialReconciliation) {
            return Err(StoreError::PartiallyApplied(format!(
                "statement balance saved on {} but transactions not marked",
                commit.account_id
            )));
        }
        self.inner.apply_reconciliation(commit).await
    }

    async fn apply_movement(&self, command: &ApplyMovement) -> Result<InventoryItem, StoreError> {
        self.inner.apply_movement(command).await
    }

    async fn upsert_settings(
        &self,
        settings: &OrganizationSettings,
    ) -> Result<OrganizationSettings, StoreError> {
        self.inner.upsert_settings(settings).await
    }
}
