//! Report engine service for Ledgerline.
//!
//! Wires the pure computations of `ledgerline-core` to a record store from
//! `ledgerline-store`: parameter validation, timed fetches, command
//! application and structured logging.

pub mod engine;
pub mod query;

pub use engine::ReportEngine;
pub use query::{
    AsOfQuery, AssetPerformanceQuery, BookQuery, ChequeQuery, LedgerQuery, PeriodQuery,
    ReconciliationQuery,
};
